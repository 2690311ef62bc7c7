//! Turning user input into request targets.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use url::Url;

use crate::error::{Error, Result};

pub const DEFAULT_API_HOST: &str = "https://api.val.town";
/// Versioned root segment every API path lives under.
pub const API_VERSION: &str = "v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }

    /// Picks the method when the user did not name one: POST if there is a
    /// body to send, GET otherwise.
    pub fn infer(explicit: Option<Method>, body: &[u8]) -> Method {
        match explicit {
            Some(method) => method,
            None if body.is_empty() => Method::Get,
            None => Method::Post,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
            Method::Head => reqwest::Method::HEAD,
            Method::Options => reqwest::Method::OPTIONS,
        }
    }
}

/// A val identifier, `owner.name`, optionally written with a leading `@`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValId {
    pub owner: String,
    pub name: String,
}

impl FromStr for ValId {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let val = input.strip_prefix('@').unwrap_or(input);
        let parts: Vec<&str> = val.split('.').collect();
        match parts.as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(Error::InvalidValId(val.to_string())),
        }
    }
}

impl fmt::Display for ValId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner, self.name)
    }
}

/// The API host that scheme-less targets and fixed endpoints resolve against.
/// A path on the base URL (a proxy prefix, say) is kept in front of `/v1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRoot {
    base: Url,
}

impl ApiRoot {
    pub fn new(base: &str) -> Result<Self> {
        let base = Url::parse(base)?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(Error::InvalidConfig(format!(
                "API URL must be an http(s) URL: {base}"
            )));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolves user input to an absolute URL.
    ///
    /// Input with a scheme is used as is. Anything else is a path on the API
    /// host: a leading `/` is added if missing, and `/v1` is prepended unless
    /// the path already starts with that segment.
    pub fn resolve(&self, input: &str) -> Result<Url> {
        match Url::parse(input) {
            Ok(url) => return Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {}
            Err(e) => return Err(e.into()),
        }

        let (path, fragment) = match input.split_once('#') {
            Some((path, fragment)) => (path, Some(fragment)),
            None => (input, None),
        };
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };

        let mut path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        if !has_version_root(&path) {
            path = format!("/{API_VERSION}{path}");
        }

        let prefix = self.base.path().trim_end_matches('/');
        let mut url = self.base.clone();
        url.set_path(&format!("{prefix}{path}"));
        url.set_query(query);
        url.set_fragment(fragment);
        Ok(url)
    }

    /// Builds `<base>/v1/<segments...>`, percent-encoding each segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| Error::InvalidConfig(format!("API URL cannot be a base: {}", self.base)))?
            .pop_if_empty()
            .push(API_VERSION)
            .extend(segments);
        Ok(url)
    }

    pub fn eval_url(&self) -> Result<Url> {
        self.endpoint(&["eval"])
    }

    pub fn run_url(&self, val: &ValId) -> Result<Url> {
        let id = val.to_string();
        self.endpoint(&["run", id.as_str()])
    }

    pub fn alias_url(&self, val: &ValId) -> Result<Url> {
        self.endpoint(&["alias", val.owner.as_str(), val.name.as_str()])
    }
}

fn has_version_root(path: &str) -> bool {
    let rest = path.strip_prefix('/').unwrap_or(path);
    match rest.strip_prefix(API_VERSION) {
        Some(after) => after.is_empty() || after.starts_with('/'),
        None => false,
    }
}
