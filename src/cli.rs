use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::models::category::{Category, ParseCategoryError};

#[derive(Debug, Parser)]
#[command(name = "filehub", version, about = "Browse, upload and download files on FileHub")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List the catalog
    List {
        /// All, Documents, Archives, Video, Design or Other
        #[arg(default_value = "All", value_parser = parse_category)]
        category: Category,
    },
    /// List files whose name contains <QUERY>
    Search {
        query: String,
        #[arg(default_value = "All", value_parser = parse_category)]
        category: Category,
    },
    /// Upload a local file
    Upload {
        path: PathBuf,
        /// Defaults to Other; All is not a valid upload label and maps to Other
        #[arg(default_value = "Other", value_parser = parse_upload_category)]
        category: Category,
    },
    /// Record a download
    Download { file_id: String },
    /// Show your download history
    History,
    /// Show your upload and download statistics
    Profile,
}

fn parse_category(value: &str) -> Result<Category, ParseCategoryError> {
    value.parse()
}

fn parse_upload_category(value: &str) -> Result<Category, ParseCategoryError> {
    parse_category(value).map(Category::for_upload)
}
