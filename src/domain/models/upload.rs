use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::models::category::Category;

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Where the content of a picked or dropped file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
    /// `data:<mime>;base64,<payload>` as handed over by a web frontend.
    DataUrl(String),
}

/// A file chosen by the user, not yet read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub name: String,
    pub mime_type: String,
    pub source: FileSource,
}

impl LocalFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string());
        let mime_type = guess_mime_type(&path);

        Self {
            name,
            mime_type,
            source: FileSource::Path(path),
        }
    }

    pub fn from_bytes(name: impl Into<String>, content: Vec<u8>) -> Self {
        let name = name.into();
        let mime_type = guess_mime_type(Path::new(&name));

        Self {
            name,
            mime_type,
            source: FileSource::Bytes(content),
        }
    }

    pub fn from_data_url(name: impl Into<String>, data_url: impl Into<String>) -> Self {
        let name = name.into();
        let data_url = data_url.into();
        let mime_type = data_url
            .strip_prefix("data:")
            .and_then(|rest| rest.split(&[';', ','][..]).next())
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| guess_mime_type(Path::new(&name)));

        Self {
            name,
            mime_type,
            source: FileSource::DataUrl(data_url),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }
}

fn guess_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(DEFAULT_MIME_TYPE)
        .to_string()
}

/// Body of the upload call. Built per upload and dropped once the call returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadRequest {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub category: Category,
    #[serde(rename = "content")]
    pub base64_content: String,
}
