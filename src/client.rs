use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use url::Url;

use crate::error::{Error, Result};
use crate::target::Method;
use crate::token::Credential;

/// One request, built once and consumed by [`ValTownClient::execute`].
#[derive(Debug, Clone)]
pub struct RequestSpec {
    method: Method,
    url: Url,
    body: Option<Vec<u8>>,
    headers: HeaderMap,
}

impl RequestSpec {
    /// An empty body is treated as no body. GET with a body is rejected.
    pub fn new(method: Method, url: Url, body: Option<Vec<u8>>) -> Result<Self> {
        let body = body.filter(|b| !b.is_empty());
        if method == Method::Get && body.is_some() {
            return Err(Error::GetWithBody);
        }

        Ok(Self {
            method,
            url,
            body,
            headers: HeaderMap::new(),
        })
    }

    pub fn get(url: Url) -> Self {
        Self {
            method: Method::Get,
            url,
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn post_json<T: Serialize>(url: Url, payload: &T) -> Result<Self> {
        let body = serde_json::to_vec(payload)?;
        Self::new(Method::Post, url, Some(body))
    }

    /// Adds a header given as `Name: Value`. Repeating a name sends every
    /// value; a name the client sets itself (`Authorization`, `Content-Type`)
    /// replaces the default.
    pub fn header(mut self, raw: &str) -> Result<Self> {
        let invalid = || Error::InvalidHeader(raw.to_string());
        let (name, value) = raw.split_once(':').ok_or_else(invalid)?;
        let name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|_| invalid())?;
        let value = HeaderValue::from_str(value.trim()).map_err(|_| invalid())?;
        self.headers.append(name, value);
        Ok(self)
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// Issues single requests against the API. There are no retries and no
/// client-side timeout: an unresponsive server blocks until the process is
/// stopped.
pub struct ValTownClient {
    client: Client,
    credential: Option<Credential>,
}

impl ValTownClient {
    pub fn new(credential: Option<Credential>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("vt/", env!("CARGO_PKG_VERSION")))
            .redirect(Policy::none())
            .build()?;

        Ok(Self { client, credential })
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    fn build_request(&self, spec: RequestSpec) -> Result<reqwest::RequestBuilder> {
        let mut request = self.client.request(spec.method.into(), spec.url);

        if let Some(credential) = &self.credential {
            let value = HeaderValue::from_str(&credential.bearer())
                .map_err(|_| Error::InvalidHeader("Authorization: Bearer <token>".to_string()))?;
            request = request.header(AUTHORIZATION, value);
        }

        if let Some(body) = spec.body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body);
        }

        Ok(request.headers(spec.headers))
    }

    /// Sends the request and returns the body of a 200 response. Any other
    /// status, redirects included, is an error.
    pub async fn execute(&self, spec: RequestSpec) -> Result<Vec<u8>> {
        tracing::debug!(method = %spec.method, url = %spec.url, "sending request");

        let response = self.build_request(spec)?.send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!(%status, "request failed");
            return Err(Error::Status(status));
        }

        let body = response.bytes().await?;
        tracing::debug!(%status, len = body.len(), "received response");
        Ok(body.to_vec())
    }
}
