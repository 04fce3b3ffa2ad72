mod file_sharing_api;
mod identity_provider;

pub use file_sharing_api::FileSharingApi;
pub use identity_provider::{IdentityProvider, StaticIdentity};
