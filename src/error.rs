//! Error types for the Blockworld client

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid request URI '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("Failed to build request: {0}")]
    Request(#[from] hyper::http::Error),

    #[error("HTTP transport error: {0}")]
    Http(#[from] hyper::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Response body is not valid UTF-8 text: {0}")]
    Body(#[from] std::string::FromUtf8Error),

    #[error("Server answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Status code carried by a [`ClientError::Status`], if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::Config(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Config(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ClientError>;
