//! Error types shared by every stage of the request pipeline.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad user input or configuration, rejected before any request is sent.
    Config,
    /// Local I/O: token file, standard input, standard output.
    Io,
    /// The single HTTP attempt failed below the protocol level.
    Network,
    /// The server answered, but not with a usable 200 JSON response.
    Protocol,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot specify request body for GET request")]
    GetWithBody,
    #[error("invalid val: {0} (expected owner.name)")]
    InvalidValId(String),
    #[error("expression required")]
    ExpressionRequired,
    #[error("invalid header {0:?} (expected \"Name: Value\")")]
    InvalidHeader(String),
    #[error("invalid URL")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to get home directory")]
    HomeDirUnavailable,

    #[error("failed to read token file {}", .path.display())]
    TokenFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read standard input")]
    Stdin(#[source] std::io::Error),
    #[error("failed to write output")]
    Output(#[source] std::io::Error),

    #[error("request failed")]
    Http(#[from] reqwest::Error),

    #[error("request failed: {0}")]
    Status(StatusCode),
    #[error("failed to decode response")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::GetWithBody
            | Self::InvalidValId(_)
            | Self::ExpressionRequired
            | Self::InvalidHeader(_)
            | Self::InvalidUrl(_)
            | Self::InvalidConfig(_)
            | Self::HomeDirUnavailable => ErrorKind::Config,
            Self::TokenFile { .. } | Self::Stdin(_) | Self::Output(_) => ErrorKind::Io,
            Self::Http(_) => ErrorKind::Network,
            Self::Status(_) | Self::Decode(_) => ErrorKind::Protocol,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
