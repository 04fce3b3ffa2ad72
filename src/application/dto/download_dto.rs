use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct RecordDownloadRequest<'a> {
    #[serde(rename = "fileId")]
    pub file_id: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DownloadAck {
    pub success: bool,
    pub downloads: u64,
}
