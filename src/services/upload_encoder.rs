use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use tracing::debug;

use crate::{
    domain::models::{
        category::Category,
        upload::{FileSource, LocalFile, UploadRequest},
    },
    services::error::EncodingError,
};

/// Reads the whole file and returns its base64 payload, without any
/// `data:` prefix.
pub async fn encode(file: &LocalFile) -> Result<String, EncodingError> {
    read_payload(file).await.map(|(_, payload)| payload)
}

/// Reads `file` once and assembles the upload body for it.
pub async fn build_upload_request(
    file: &LocalFile,
    category: Category,
) -> Result<UploadRequest, EncodingError> {
    let (size, base64_content) = read_payload(file).await?;

    Ok(UploadRequest {
        name: file.name.clone(),
        size,
        mime_type: file.mime_type.clone(),
        category: category.for_upload(),
        base64_content,
    })
}

async fn read_payload(file: &LocalFile) -> Result<(u64, String), EncodingError> {
    match &file.source {
        FileSource::Path(path) => {
            let content = tokio::fs::read(path)
                .await
                .map_err(|source| EncodingError::Read {
                    name: file.name.clone(),
                    source,
                })?;
            debug!("Read {} bytes from {:?}", content.len(), path);
            Ok((content.len() as u64, BASE64.encode(&content)))
        }
        FileSource::Bytes(content) => Ok((content.len() as u64, BASE64.encode(content))),
        FileSource::DataUrl(data_url) => {
            let payload = strip_data_url_prefix(data_url).ok_or_else(|| {
                EncodingError::InvalidDataUrl {
                    name: file.name.clone(),
                }
            })?;
            let decoded = BASE64
                .decode(payload)
                .map_err(|_| EncodingError::InvalidDataUrl {
                    name: file.name.clone(),
                })?;
            Ok((decoded.len() as u64, payload.to_string()))
        }
    }
}

/// Everything after the first comma of a `data:` URL.
pub fn strip_data_url_prefix(data_url: &str) -> Option<&str> {
    if !data_url.starts_with("data:") {
        return None;
    }
    data_url.split_once(',').map(|(_, payload)| payload)
}
