use serde::Deserialize;

use crate::domain::models::file::FileRecord;

/// `{ "files": [...] }`. A missing field reads as an empty catalog.
#[derive(Debug, Default, Deserialize)]
pub struct FilesResponse {
    #[serde(default)]
    pub files: Vec<FileRecord>,
}
