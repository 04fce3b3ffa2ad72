use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{
    application::{
        dto::{
            download_dto::{DownloadAck, RecordDownloadRequest},
            file_dto::FilesResponse,
            history_dto::HistoryResponse,
            upload_dto::UploadAck,
        },
        error::ApplicationError,
        services::{FileSharingApi, IdentityProvider},
    },
    domain::{
        config::client::{ApiEndpoints, ClientConfig},
        models::{
            category::Category, file::FileRecord, history::DownloadHistoryEntry,
            upload::UploadRequest,
        },
    },
    services::error::TransportError,
};

pub const USER_ID_HEADER: &str = "X-User-Id";

pub struct HttpFileSharingClient {
    client: Client,
    endpoints: ApiEndpoints,
    identity: Arc<dyn IdentityProvider>,
}

impl HttpFileSharingClient {
    pub fn new(
        config: &ClientConfig,
        identity: Arc<dyn IdentityProvider>,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| TransportError::InternalError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoints: config.endpoints.clone(),
            identity,
        })
    }

    fn identified(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header(USER_ID_HEADER, self.identity.user_id())
    }

    async fn ensure_success(response: Response, context: &str) -> Result<Response, TransportError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!("{} returned {}: {}", context, status, body);
        Err(TransportError::from_status(status, context))
    }

    /// Parses `body`, treating anything unreadable as the empty value.
    fn parse_or_default<T>(body: &str, context: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        serde_json::from_str(body).unwrap_or_else(|e| {
            warn!("Malformed {} response, using empty default: {}", context, e);
            T::default()
        })
    }
}

#[async_trait]
impl FileSharingApi for HttpFileSharingClient {
    async fn list_files(
        &self,
        category: Option<Category>,
    ) -> Result<Vec<FileRecord>, ApplicationError> {
        let mut request = self.client.get(&self.endpoints.get_files);
        if let Some(value) = category.and_then(|c| c.query_value()) {
            request = request.query(&[("category", value)]);
        }

        let response = request.send().await.map_err(TransportError::from)?;
        let response = Self::ensure_success(response, "List files").await?;
        let body = response.text().await.map_err(TransportError::from)?;

        let files = Self::parse_or_default::<FilesResponse>(&body, "list files").files;
        debug!("Fetched {} files (category: {:?})", files.len(), category);
        Ok(files)
    }

    async fn upload_file(&self, request: UploadRequest) -> Result<UploadAck, ApplicationError> {
        info!(
            "Uploading {} ({} bytes, {}) to category {}",
            request.name, request.size, request.mime_type, request.category
        );

        let response = self
            .identified(self.client.post(&self.endpoints.upload_file))
            .json(&request)
            .send()
            .await
            .map_err(TransportError::from)?;
        let response = Self::ensure_success(response, "Upload").await?;
        let body = response.text().await.map_err(TransportError::from)?;

        let ack = Self::parse_or_default::<UploadAck>(&body, "upload");
        info!("Upload acknowledged: id={:?}", ack.id);
        Ok(ack)
    }

    async fn record_download(&self, file_id: &str) -> Result<(), ApplicationError> {
        let response = self
            .identified(self.client.post(&self.endpoints.download_file))
            .json(&RecordDownloadRequest { file_id })
            .send()
            .await
            .map_err(TransportError::from)?;
        let response = Self::ensure_success(response, "Record download").await?;
        let body = response.text().await.map_err(TransportError::from)?;

        let ack = Self::parse_or_default::<DownloadAck>(&body, "record download");
        debug!(
            "Download of {} recorded: success={}, downloads={}",
            file_id, ack.success, ack.downloads
        );
        Ok(())
    }

    async fn fetch_history(&self) -> Result<Vec<DownloadHistoryEntry>, ApplicationError> {
        let response = self
            .identified(self.client.get(&self.endpoints.get_history))
            .send()
            .await
            .map_err(TransportError::from)?;
        let response = Self::ensure_success(response, "Fetch history").await?;
        let body = response.text().await.map_err(TransportError::from)?;

        Ok(Self::parse_or_default::<HistoryResponse>(&body, "history").history)
    }
}
