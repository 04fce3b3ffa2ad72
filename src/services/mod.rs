mod error;
mod http_api_client;
pub mod upload_encoder;

pub use error::{EncodingError, TransportError};
pub use http_api_client::{HttpFileSharingClient, USER_ID_HEADER};

use std::sync::Arc;

use crate::{
    application::services::{FileSharingApi, IdentityProvider, StaticIdentity},
    domain::config::client::ClientConfig,
};

pub fn create_identity_provider(config: &ClientConfig) -> Arc<dyn IdentityProvider> {
    Arc::new(StaticIdentity::new(config.user_id.clone()))
}

pub fn create_api_client(
    config: &ClientConfig,
    identity: Arc<dyn IdentityProvider>,
) -> Result<Arc<dyn FileSharingApi>, TransportError> {
    let client = HttpFileSharingClient::new(config, identity)?;
    Ok(Arc::new(client))
}
