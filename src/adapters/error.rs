use tracing::{error, warn};

use crate::{adapters::notifications::Notification, application::error::ApplicationError};

impl ApplicationError {
    /// Turns a failed user action into the toast shown for it.
    pub fn into_notification(self, title: &str) -> Notification {
        let description = match self {
            ApplicationError::Network(ref msg) => {
                warn!("{}: network error: {}", title, msg);
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            ApplicationError::NotFound(ref msg) => {
                warn!("{}: not found: {}", title, msg);
                "The requested file no longer exists.".to_string()
            }
            ApplicationError::Unauthorized(ref msg) => {
                warn!("{}: unauthorized: {}", title, msg);
                "You are not allowed to do that.".to_string()
            }
            ApplicationError::Provider(ref msg) => {
                error!("{}: server error: {}", title, msg);
                "The server could not complete the request. Please try again later.".to_string()
            }
            ApplicationError::Encoding(ref msg) => {
                warn!("{}: encoding error: {}", title, msg);
                msg.clone()
            }
            ApplicationError::UploadInProgress => {
                warn!("{}: upload already running", title);
                "Wait for the current upload to finish.".to_string()
            }
            ApplicationError::Config(ref msg) => {
                error!("{}: configuration error: {}", title, msg);
                msg.clone()
            }
            ApplicationError::BadRequest(ref msg) => {
                warn!("{}: bad request: {}", title, msg);
                msg.clone()
            }
        };

        Notification::error(title, description)
    }
}
