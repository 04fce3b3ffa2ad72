use async_trait::async_trait;

use crate::{
    application::{dto::upload_dto::UploadAck, error::ApplicationError},
    domain::models::{
        category::Category, file::FileRecord, history::DownloadHistoryEntry,
        upload::UploadRequest,
    },
};

/// The remote file-sharing service as seen by the view.
#[async_trait]
pub trait FileSharingApi: Send + Sync {
    /// `None` and `Some(Category::All)` both list the whole catalog.
    async fn list_files(&self, category: Option<Category>)
        -> Result<Vec<FileRecord>, ApplicationError>;
    async fn upload_file(&self, request: UploadRequest) -> Result<UploadAck, ApplicationError>;
    async fn record_download(&self, file_id: &str) -> Result<(), ApplicationError>;
    async fn fetch_history(&self) -> Result<Vec<DownloadHistoryEntry>, ApplicationError>;
}
