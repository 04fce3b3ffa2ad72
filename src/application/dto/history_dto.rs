use serde::Deserialize;

use crate::domain::models::history::DownloadHistoryEntry;

#[derive(Debug, Default, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<DownloadHistoryEntry>,
}
