use crate::{
    adapters::notifications::Notification,
    domain::models::{category::Category, file::FileRecord, history::DownloadHistoryEntry},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Catalog,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    InProgress,
    /// Bar is pinned at 100% for the settle delay.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileStats {
    pub uploaded_files: usize,
    pub total_downloads: u64,
    pub history_entries: usize,
}

/// Everything the frontend renders. Lives as long as the controller.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub search_query: String,
    pub category: Category,
    pub tab: Tab,
    pub upload_phase: UploadPhase,
    /// 0-100, simulated.
    pub upload_progress: u8,
    pub dragging: bool,
    pub files: Vec<FileRecord>,
    /// Unfiltered catalog backing the profile stats, loaded on entering the
    /// profile tab.
    pub profile_files: Vec<FileRecord>,
    pub history: Vec<DownloadHistoryEntry>,
    pub notifications: Vec<Notification>,
}

impl ViewState {
    pub fn is_uploading(&self) -> bool {
        self.upload_phase != UploadPhase::Idle
    }

    /// Loaded files narrowed by the search box. Category filtering already
    /// happened on the server.
    pub fn visible_files(&self) -> Vec<FileRecord> {
        self.files
            .iter()
            .filter(|f| f.name_contains(&self.search_query))
            .cloned()
            .collect()
    }

    pub fn profile_stats(&self, user_id: &str) -> ProfileStats {
        let own = self.profile_files.iter().filter(|f| f.uploaded_by == user_id);

        ProfileStats {
            uploaded_files: own.clone().count(),
            total_downloads: own.map(|f| f.downloads).sum(),
            history_entries: self.history.len(),
        }
    }
}
