use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed set of tags used to filter the catalog and to label uploads.
///
/// Variants carry English names for display and parsing; on the wire the
/// service stores and filters on its own labels, see [`Category::label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    #[serde(rename = "Все")]
    All,
    #[serde(rename = "Документы")]
    Documents,
    #[serde(rename = "Архивы")]
    Archives,
    #[serde(rename = "Видео")]
    Video,
    #[serde(rename = "Дизайн")]
    Design,
    #[serde(rename = "Другое")]
    Other,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown category: {0}")]
pub struct ParseCategoryError(pub String);

impl Category {
    pub const VALUES: [Category; 6] = [
        Category::All,
        Category::Documents,
        Category::Archives,
        Category::Video,
        Category::Design,
        Category::Other,
    ];

    /// Categories offered as catalog filters, in display order.
    pub const FILTERS: [Category; 5] = [
        Category::All,
        Category::Documents,
        Category::Archives,
        Category::Video,
        Category::Design,
    ];

    /// Category attached to uploads when the user picked none.
    pub const UPLOAD_DEFAULT: Category = Category::Other;

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Documents => "Documents",
            Category::Archives => "Archives",
            Category::Video => "Video",
            Category::Design => "Design",
            Category::Other => "Other",
        }
    }

    /// Label the service stores on records and expects in filters.
    /// Must stay in sync with the serde renames above.
    pub fn label(&self) -> &'static str {
        match self {
            Category::All => "Все",
            Category::Documents => "Документы",
            Category::Archives => "Архивы",
            Category::Video => "Видео",
            Category::Design => "Дизайн",
            Category::Other => "Другое",
        }
    }

    /// Value of the `category` query parameter, `None` for the `All` sentinel.
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            Category::All => None,
            other => Some(other.label()),
        }
    }

    /// Whether a record labelled `label` belongs to this filter.
    pub fn matches(&self, label: &str) -> bool {
        match self {
            Category::All => true,
            other => other.label() == label,
        }
    }

    /// Label for an upload. `All` is a filter only and falls back to the default.
    pub fn for_upload(self) -> Category {
        match self {
            Category::All => Self::UPLOAD_DEFAULT,
            other => other,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the English name in any case, or the service label.
impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::VALUES
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed) || c.label() == trimmed)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}
