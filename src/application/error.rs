use thiserror::Error;

use crate::domain::{config::client::ConfigError, models::category::ParseCategoryError};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Server error: {0}")]
    Provider(String),

    #[error("Could not read file: {0}")]
    Encoding(String),

    #[error("An upload is already in progress")]
    UploadInProgress,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<ConfigError> for ApplicationError {
    fn from(error: ConfigError) -> Self {
        ApplicationError::Config(error.to_string())
    }
}

impl From<ParseCategoryError> for ApplicationError {
    fn from(error: ParseCategoryError) -> Self {
        ApplicationError::BadRequest(error.to_string())
    }
}
