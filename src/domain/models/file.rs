use serde::{Deserialize, Serialize};

/// Catalog entry as served by the files endpoint. Display fields arrive
/// preformatted and are never recomputed on the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    pub size: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub downloads: u64,
    #[serde(rename = "uploadedBy")]
    pub uploaded_by: String,
    #[serde(rename = "uploadedDate")]
    pub uploaded_date: String,
    pub category: String,
}

impl FileRecord {
    pub fn kind(&self) -> FileKind {
        FileKind::from_type_key(&self.file_type)
    }

    pub fn name_contains(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Archive,
    Video,
    Spreadsheet,
    Image,
    Figma,
    Generic,
}

impl FileKind {
    pub fn from_type_key(key: &str) -> Self {
        match key.to_ascii_lowercase().as_str() {
            "pdf" => FileKind::Pdf,
            "zip" => FileKind::Archive,
            "video" => FileKind::Video,
            "excel" => FileKind::Spreadsheet,
            "image" => FileKind::Image,
            "figma" => FileKind::Figma,
            _ => FileKind::Generic,
        }
    }

    /// Icon identifier frontends render for this kind.
    pub fn icon_name(&self) -> &'static str {
        match self {
            FileKind::Pdf => "FileText",
            FileKind::Archive => "Archive",
            FileKind::Video => "Video",
            FileKind::Spreadsheet => "Sheet",
            FileKind::Image => "Image",
            FileKind::Figma => "Palette",
            FileKind::Generic => "File",
        }
    }
}

/// Human-readable byte count, one decimal above a kilobyte.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    }
}
