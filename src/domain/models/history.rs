use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadHistoryEntry {
    pub id: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub date: String,
}
