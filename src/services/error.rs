use reqwest::StatusCode;
use thiserror::Error;

use crate::application::error::ApplicationError;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Server error: {0}")]
    ProviderError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("Failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{name} is not a base64 data URL")]
    InvalidDataUrl { name: String },
}

impl TransportError {
    pub fn from_status(status: StatusCode, context: &str) -> Self {
        match status.as_u16() {
            404 => TransportError::NotFound(context.to_string()),
            401 | 403 => TransportError::Unauthorized(format!("{} ({})", context, status)),
            _ => TransportError::ProviderError(format!("{} failed with status {}", context, status)),
        }
    }
}

impl From<TransportError> for ApplicationError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::NotFound(msg) => ApplicationError::NotFound(msg),
            TransportError::Unauthorized(msg) => ApplicationError::Unauthorized(msg),
            TransportError::NetworkError(msg) => ApplicationError::Network(msg),
            TransportError::ProviderError(msg) | TransportError::InternalError(msg) => {
                ApplicationError::Provider(msg)
            }
        }
    }
}

impl From<EncodingError> for ApplicationError {
    fn from(error: EncodingError) -> Self {
        ApplicationError::Encoding(error.to_string())
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportError::NetworkError("Request timeout".to_string())
        } else if error.is_connect() {
            TransportError::NetworkError(format!("Connection failed: {}", error))
        } else if let Some(status) = error.status() {
            TransportError::from_status(status, &error.to_string())
        } else if error.is_request() || error.is_body() {
            TransportError::NetworkError(error.to_string())
        } else {
            TransportError::InternalError(error.to_string())
        }
    }
}
