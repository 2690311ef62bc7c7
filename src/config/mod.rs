use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::target::{ApiRoot, DEFAULT_API_HOST};

pub const API_ENV: &str = "VALTOWN_API";
const CONFIG_FILE: &str = "config.toml";
const TOKEN_FILE: &str = "api_token";

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    api: ApiSection,
}

#[derive(Debug, Default, Deserialize)]
struct ApiSection {
    url: Option<String>,
}

/// Settings for one invocation, built once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    config_dir: Option<PathBuf>,
    pub api: ApiRoot,
}

impl Config {
    /// Loads `~/.config/vt/config.toml` (if present) and applies the
    /// `VALTOWN_API` override.
    pub fn load() -> Result<Self> {
        let env_url = std::env::var(API_ENV).ok().filter(|url| !url.is_empty());
        Self::from_parts(Self::get_config_dir(), env_url.as_deref())
    }

    pub fn from_parts(config_dir: Option<PathBuf>, api_url: Option<&str>) -> Result<Self> {
        let file_url = match &config_dir {
            Some(dir) => read_config_file(&dir.join(CONFIG_FILE))?.api.url,
            None => None,
        };

        let url = api_url
            .map(str::to_string)
            .or(file_url)
            .unwrap_or_else(|| DEFAULT_API_HOST.to_string());
        let api = ApiRoot::new(&url)?;
        tracing::debug!(api = %api.base(), "loaded config");

        Ok(Self { config_dir, api })
    }

    /// `$HOME/.config/vt`, on every platform.
    pub fn get_config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("vt"))
    }

    pub fn config_dir(&self) -> Option<&Path> {
        self.config_dir.as_deref()
    }

    pub fn token_file(&self) -> Option<PathBuf> {
        self.config_dir.as_ref().map(|dir| dir.join(TOKEN_FILE))
    }
}

fn read_config_file(path: &Path) -> Result<FileConfig> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(FileConfig::default()),
        Err(e) => {
            return Err(Error::InvalidConfig(format!(
                "failed to read {}: {e}",
                path.display()
            )))
        }
    };

    toml::from_str(&content)
        .map_err(|e| Error::InvalidConfig(format!("failed to parse {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) {
        fs::write(dir.path().join(CONFIG_FILE), contents).expect("write config");
    }

    #[test]
    fn defaults_without_config_file() {
        let dir = TempDir::new().expect("tempdir");
        let config = Config::from_parts(Some(dir.path().to_path_buf()), None).expect("config");
        assert_eq!(config.api.base().as_str(), "https://api.val.town/");
        assert_eq!(config.token_file(), Some(dir.path().join("api_token")));
    }

    #[test]
    fn config_file_sets_api_url() {
        let dir = TempDir::new().expect("tempdir");
        write_config(&dir, "[api]\nurl = \"http://localhost:4000\"\n");
        let config = Config::from_parts(Some(dir.path().to_path_buf()), None).expect("config");
        assert_eq!(config.api.base().as_str(), "http://localhost:4000/");
    }

    #[test]
    fn env_url_beats_config_file() {
        let dir = TempDir::new().expect("tempdir");
        write_config(&dir, "[api]\nurl = \"http://localhost:4000\"\n");
        let config = Config::from_parts(Some(dir.path().to_path_buf()), Some("http://127.0.0.1:5000"))
            .expect("config");
        assert_eq!(config.api.base().as_str(), "http://127.0.0.1:5000/");
    }

    #[test]
    fn malformed_config_is_rejected() {
        let dir = TempDir::new().expect("tempdir");
        write_config(&dir, "[api\nurl = ");
        let err = Config::from_parts(Some(dir.path().to_path_buf()), None).expect_err("bad toml");
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn no_home_means_no_token_file() {
        let config = Config::from_parts(None, None).expect("config");
        assert!(config.token_file().is_none());
    }
}
