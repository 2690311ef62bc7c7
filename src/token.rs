//! Bearer token resolution.
//!
//! A token is looked up, first match wins, from:
//! 1. the `--token` flag,
//! 2. the `VALTOWN_TOKEN` environment variable,
//! 3. the `api_token` file in the config directory.
//!
//! A source that is present but empty still wins and yields an anonymous
//! invocation; it never falls through to the next source.

use std::fmt;
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::Path;

use crate::error::{Error, Result};

pub const TOKEN_ENV: &str = "VALTOWN_TOKEN";

/// An opaque bearer token. Never empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for an empty token.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Where the resolved token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Flag,
    Env,
    File,
    None,
}

/// The raw inputs to token resolution, gathered by the caller.
#[derive(Debug, Default)]
pub struct TokenSources<'a> {
    pub flag: Option<&'a str>,
    pub env: Option<&'a str>,
    /// `None` when no config directory could be determined.
    pub file: Option<&'a Path>,
}

impl TokenSources<'_> {
    pub fn resolve(&self) -> Result<(Option<Credential>, TokenSource)> {
        if let Some(flag) = self.flag {
            return Ok((Credential::new(flag), TokenSource::Flag));
        }

        if let Some(env) = self.env {
            return Ok((Credential::new(env), TokenSource::Env));
        }

        let path = self.file.ok_or(Error::HomeDirUnavailable)?;
        match read_token_file(path)? {
            Some(token) => Ok((Credential::new(token), TokenSource::File)),
            None => Ok((None, TokenSource::None)),
        }
    }
}

/// Reads and trims the token file. A missing file is not an error.
fn read_token_file(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content.trim().to_string())),
        Err(e) if e.kind() == IoErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::TokenFile {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Resolves the credential for this invocation from the flag, the process
/// environment and the token file.
pub fn resolve(flag: Option<&str>, token_file: Option<&Path>) -> Result<Option<Credential>> {
    let env = std::env::var(TOKEN_ENV).ok();
    let sources = TokenSources {
        flag,
        env: env.as_deref(),
        file: token_file,
    };

    let (credential, source) = sources.resolve()?;
    tracing::debug!(?source, anonymous = credential.is_none(), "resolved token");
    Ok(credential)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;
    use tempfile::TempDir;

    fn token_file(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("api_token");
        let mut file = fs::File::create(&path).expect("create token file");
        file.write_all(contents.as_bytes()).expect("write token file");
        path
    }

    fn token(sources: &TokenSources<'_>) -> Option<String> {
        sources
            .resolve()
            .expect("resolve")
            .0
            .map(|c| c.as_str().to_string())
    }

    #[test]
    fn flag_beats_env_and_file() {
        let dir = TempDir::new().expect("tempdir");
        let file = token_file(&dir, "C");
        let sources = TokenSources {
            flag: Some("A"),
            env: Some("B"),
            file: Some(&file),
        };
        assert_eq!(token(&sources), Some("A".into()));
    }

    #[test]
    fn env_beats_file() {
        let dir = TempDir::new().expect("tempdir");
        let file = token_file(&dir, "C");
        let sources = TokenSources {
            flag: None,
            env: Some("B"),
            file: Some(&file),
        };
        assert_eq!(token(&sources), Some("B".into()));
    }

    #[test]
    fn file_is_trimmed() {
        let dir = TempDir::new().expect("tempdir");
        let file = token_file(&dir, "  C\n");
        let sources = TokenSources {
            file: Some(&file),
            ..Default::default()
        };
        let (credential, source) = sources.resolve().expect("resolve");
        assert_eq!(credential.map(|c| c.as_str().to_string()), Some("C".into()));
        assert_eq!(source, TokenSource::File);
    }

    #[test]
    fn missing_file_is_anonymous() {
        let dir = TempDir::new().expect("tempdir");
        let file = dir.path().join("api_token");
        let sources = TokenSources {
            file: Some(&file),
            ..Default::default()
        };
        let (credential, source) = sources.resolve().expect("resolve");
        assert!(credential.is_none());
        assert_eq!(source, TokenSource::None);
    }

    #[test]
    fn empty_env_does_not_fall_through() {
        let dir = TempDir::new().expect("tempdir");
        let file = token_file(&dir, "C");
        let sources = TokenSources {
            flag: None,
            env: Some(""),
            file: Some(&file),
        };
        let (credential, source) = sources.resolve().expect("resolve");
        assert!(credential.is_none());
        assert_eq!(source, TokenSource::Env);
    }

    #[test]
    fn unreadable_file_is_fatal() {
        // A directory in place of the file fails to read with something other than NotFound.
        let dir = TempDir::new().expect("tempdir");
        let sources = TokenSources {
            file: Some(dir.path()),
            ..Default::default()
        };
        let err = sources.resolve().expect_err("directory is not a token file");
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn no_home_is_only_an_error_when_the_file_is_needed() {
        let sources = TokenSources {
            flag: Some("A"),
            ..Default::default()
        };
        assert_eq!(token(&sources), Some("A".into()));

        let err = TokenSources::default().resolve().expect_err("no home");
        assert!(matches!(err, Error::HomeDirUnavailable));
    }

    #[test]
    fn credential_debug_is_redacted() {
        let credential = Credential::new("secret").expect("non-empty");
        assert!(!format!("{credential:?}").contains("secret"));
        assert_eq!(credential.bearer(), "Bearer secret");
    }
}
