pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod services;

pub use adapters::{
    controllers::{UploadTask, ViewController},
    notifications::{Notification, NotificationLevel},
    state::{ProfileStats, Tab, UploadPhase, ViewState},
};
pub use application::{
    error::ApplicationError,
    services::{FileSharingApi, IdentityProvider, StaticIdentity},
};
pub use domain::{
    config::{client::ClientConfig, simulation::ProgressSimulation},
    models::{
        category::Category,
        file::{FileKind, FileRecord},
        history::DownloadHistoryEntry,
        upload::{LocalFile, UploadRequest},
    },
};
