//! Error handling for the portal

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    /// Caught before any request is sent (missing file, unsupported format, ...)
    #[error("{0}")]
    Validation(String),

    /// Backend answered with a non-success status
    #[error("{status}: {message}")]
    Request { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Render error: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, PortalError>;

impl PortalError {
    pub fn validation(message: impl Into<String>) -> Self {
        PortalError::Validation(message.into())
    }

    /// HTTP status carried by the error, when the backend produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            PortalError::Request { status, .. } => Some(*status),
            PortalError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<askama::Error> for PortalError {
    fn from(err: askama::Error) -> Self {
        PortalError::Render(err.to_string())
    }
}
