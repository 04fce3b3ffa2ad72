use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::{
    adapters::{
        controllers::progress_ticker::ProgressTicker,
        notifications::Notification,
        state::{ProfileStats, Tab, UploadPhase, ViewState},
    },
    application::{
        dto::upload_dto::UploadAck,
        error::ApplicationError,
        services::{FileSharingApi, IdentityProvider},
    },
    domain::{
        config::simulation::ProgressSimulation,
        models::{
            category::Category,
            file::{format_size, FileRecord},
            upload::LocalFile,
        },
    },
    services::upload_encoder,
};

pub type UploadTask = JoinHandle<Result<UploadAck, ApplicationError>>;

/// Owns the view state and sequences every call to the remote service.
///
/// Cloning is cheap; clones share the same state, so a frontend can hand a
/// clone to each event handler.
#[derive(Clone)]
pub struct ViewController {
    api: Arc<dyn FileSharingApi>,
    identity: Arc<dyn IdentityProvider>,
    simulation: ProgressSimulation,
    state: Arc<Mutex<ViewState>>,
}

/// The single upload slot. Dropping it returns the phase to idle; the bar
/// goes back to 0 unless the transfer completed.
struct UploadSlot {
    state: Arc<Mutex<ViewState>>,
    completed: bool,
}

impl UploadSlot {
    fn complete(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.upload_progress = 100;
        state.upload_phase = UploadPhase::Completed;
        self.completed = true;
    }
}

impl Drop for UploadSlot {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.upload_phase = UploadPhase::Idle;
        if !self.completed {
            state.upload_progress = 0;
        }
    }
}

impl ViewController {
    pub fn new(api: Arc<dyn FileSharingApi>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            api,
            identity,
            simulation: ProgressSimulation::default(),
            state: Arc::new(Mutex::new(ViewState::default())),
        }
    }

    pub fn with_simulation(mut self, simulation: ProgressSimulation) -> Self {
        self.simulation = simulation;
        self
    }

    pub(super) fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, notification: Notification) {
        self.state().notifications.push(notification);
    }

    pub fn snapshot(&self) -> ViewState {
        self.state().clone()
    }

    pub fn take_notifications(&self) -> Vec<Notification> {
        std::mem::take(&mut self.state().notifications)
    }

    pub fn visible_files(&self) -> Vec<FileRecord> {
        self.state().visible_files()
    }

    pub fn profile_stats(&self) -> ProfileStats {
        let user_id = self.identity.user_id();
        self.state().profile_stats(&user_id)
    }

    /// Initial load when the view is shown.
    pub async fn mount(&self) -> Result<(), ApplicationError> {
        self.refresh_files().await
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        self.state().search_query = query.into();
    }

    pub async fn select_category(&self, category: Category) -> Result<(), ApplicationError> {
        {
            let mut state = self.state();
            if state.category == category {
                return Ok(());
            }
            state.category = category;
        }
        self.refresh_files().await
    }

    pub async fn select_tab(&self, tab: Tab) -> Result<(), ApplicationError> {
        let entering_profile = {
            let mut state = self.state();
            let entering = tab == Tab::Profile && state.tab != Tab::Profile;
            state.tab = tab;
            entering
        };

        if entering_profile {
            let history = self.refresh_history().await;
            let files = self.refresh_profile_files().await;
            history.and(files)?;
        }
        Ok(())
    }

    /// Refetches the catalog for the selected category. On failure the
    /// previous list stays and an error toast is queued.
    pub async fn refresh_files(&self) -> Result<(), ApplicationError> {
        let category = self.state().category;

        match self.api.list_files(Some(category)).await {
            Ok(files) => {
                let mut state = self.state();
                if state.category == category {
                    debug!("Loaded {} files for {}", files.len(), category);
                    state.files = files;
                } else {
                    debug!("Discarding stale file list for {}", category);
                }
                Ok(())
            }
            Err(e) => {
                self.notify(e.clone().into_notification("Could not load files"));
                Err(e)
            }
        }
    }

    /// Reloads the unfiltered catalog the profile stats are computed from,
    /// independent of the category picked in the catalog tab.
    pub async fn refresh_profile_files(&self) -> Result<(), ApplicationError> {
        match self.api.list_files(Some(Category::All)).await {
            Ok(files) => {
                debug!("Loaded {} files for the profile", files.len());
                self.state().profile_files = files;
                Ok(())
            }
            Err(e) => {
                self.notify(e.clone().into_notification("Could not load profile"));
                Err(e)
            }
        }
    }

    pub async fn refresh_history(&self) -> Result<(), ApplicationError> {
        match self.api.fetch_history().await {
            Ok(history) => {
                debug!("Loaded {} history entries", history.len());
                self.state().history = history;
                Ok(())
            }
            Err(e) => {
                self.notify(e.clone().into_notification("Could not load history"));
                Err(e)
            }
        }
    }

    /// Records a download of `file_id`, then refreshes whatever shows counters.
    pub async fn download(&self, file_id: &str) -> Result<(), ApplicationError> {
        let name = {
            let state = self.state();
            state
                .files
                .iter()
                .find(|f| f.id == file_id)
                .map(|f| f.name.clone())
                .or_else(|| {
                    state
                        .history
                        .iter()
                        .find(|h| h.id == file_id)
                        .map(|h| h.file_name.clone())
                })
                .unwrap_or_else(|| file_id.to_string())
        };

        if let Err(e) = self.api.record_download(file_id).await {
            self.notify(e.clone().into_notification("Download failed"));
            return Err(e);
        }

        info!("Download of {} recorded", name);
        self.notify(Notification::success("Download started", name));

        // Refreshes report their own failures.
        let _ = self.refresh_files().await;
        let on_profile = self.state().tab == Tab::Profile;
        if on_profile {
            let _ = self.refresh_history().await;
            let _ = self.refresh_profile_files().await;
        }
        Ok(())
    }

    /// Uploads `file` under the selected category and waits for the whole
    /// sequence, settle delay and catalog refresh included.
    pub async fn upload(&self, file: LocalFile) -> Result<UploadAck, ApplicationError> {
        let category = self.state().category;
        self.upload_with_category(file, category).await
    }

    pub async fn upload_with_category(
        &self,
        file: LocalFile,
        category: Category,
    ) -> Result<UploadAck, ApplicationError> {
        let slot = self.begin_upload(&file.name)?;
        self.run_upload(slot, file, category).await
    }

    /// Starts an upload from the file picker. The phase flips to
    /// `InProgress` before this returns; the transfer runs on a task.
    pub fn select_file(&self, file: LocalFile) -> Result<UploadTask, ApplicationError> {
        let slot = self.begin_upload(&file.name)?;
        let category = self.state().category;
        let controller = self.clone();

        Ok(tokio::spawn(async move {
            controller.run_upload(slot, file, category).await
        }))
    }

    fn begin_upload(&self, name: &str) -> Result<UploadSlot, ApplicationError> {
        let mut state = self.state();
        if state.is_uploading() {
            drop(state);
            let error = ApplicationError::UploadInProgress;
            self.notify(error.clone().into_notification("Upload rejected"));
            return Err(error);
        }

        info!("Starting upload of {}", name);
        state.upload_phase = UploadPhase::InProgress;
        state.upload_progress = 0;

        Ok(UploadSlot {
            state: self.state.clone(),
            completed: false,
        })
    }

    async fn run_upload(
        &self,
        mut slot: UploadSlot,
        file: LocalFile,
        category: Category,
    ) -> Result<UploadAck, ApplicationError> {
        let ticker = ProgressTicker::start(self.state.clone(), self.simulation);
        let result = self.transfer(&file, category).await;
        ticker.stop();

        let (ack, size) = match result {
            Ok(done) => done,
            Err(e) => {
                // Releasing the slot resets the bar to 0 and the phase to idle.
                drop(slot);
                self.notify(e.clone().into_notification("Upload failed"));
                return Err(e);
            }
        };

        slot.complete();
        self.notify(Notification::success(
            "File uploaded",
            format!("{} ({}) is now available", file.name, format_size(size)),
        ));

        // Detached so the settle and refetch still run if this future is
        // dropped while the bar sits at 100%.
        let controller = self.clone();
        let settle = tokio::spawn(async move {
            tokio::time::sleep(controller.simulation.settle_delay).await;
            drop(slot);
            let _ = controller.refresh_files().await;
        });

        if let Err(e) = settle.await {
            debug!("Settle after upload did not finish: {}", e);
        }
        Ok(ack)
    }

    async fn transfer(
        &self,
        file: &LocalFile,
        category: Category,
    ) -> Result<(UploadAck, u64), ApplicationError> {
        let request = upload_encoder::build_upload_request(file, category).await?;
        let size = request.size;
        let ack = self.api.upload_file(request).await?;
        Ok((ack, size))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{
        sync::atomic::{AtomicBool, AtomicUsize, Ordering},
        time::Duration,
    };

    use async_trait::async_trait;
    use tokio::time::Instant;

    use super::*;
    use crate::{
        adapters::notifications::NotificationLevel,
        application::services::StaticIdentity,
        domain::models::{history::DownloadHistoryEntry, upload::UploadRequest},
    };

    pub(crate) const UPLOAD_LATENCY: Duration = Duration::from_millis(3_000);

    /// Stand-in for the remote service: filters by category like the real
    /// one and answers uploads after a fixed latency.
    #[derive(Default)]
    pub(crate) struct FakeApi {
        pub files: Vec<FileRecord>,
        pub history: Vec<DownloadHistoryEntry>,
        pub fail_lists: AtomicBool,
        pub fail_uploads: AtomicBool,
        pub list_calls: Mutex<Vec<Option<Category>>>,
        pub history_calls: AtomicUsize,
        pub uploads: Mutex<Vec<UploadRequest>>,
        pub downloads: Mutex<Vec<String>>,
    }

    pub(crate) fn record(id: &str, name: &str, category: &str, uploaded_by: &str) -> FileRecord {
        FileRecord {
            id: id.to_string(),
            name: name.to_string(),
            size: "1.0 MB".to_string(),
            file_type: "file".to_string(),
            downloads: 1,
            uploaded_by: uploaded_by.to_string(),
            uploaded_date: "Today".to_string(),
            category: category.to_string(),
        }
    }

    impl FakeApi {
        pub(crate) fn with_catalog() -> Self {
            Self {
                files: vec![
                    record("1", "Presentation_2024.pdf", "Документы", "anna"),
                    record("2", "Project_Assets.zip", "Архивы", "max"),
                    record("3", "Annual_Report.xlsx", "Документы", "alex"),
                    record("4", "Report_Video.mp4", "Видео", "olga"),
                    record("5", "quarterly-report.docx", "Документы", "alex"),
                ],
                history: vec![DownloadHistoryEntry {
                    id: "2".to_string(),
                    file_name: "Project_Assets.zip".to_string(),
                    date: "Yesterday, 09:15".to_string(),
                }],
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl FileSharingApi for FakeApi {
        async fn list_files(
            &self,
            category: Option<Category>,
        ) -> Result<Vec<FileRecord>, ApplicationError> {
            self.list_calls.lock().unwrap().push(category);
            if self.fail_lists.load(Ordering::SeqCst) {
                return Err(ApplicationError::Network("connection refused".to_string()));
            }
            let filter = category.unwrap_or_default();
            Ok(self
                .files
                .iter()
                .filter(|f| filter.matches(&f.category))
                .cloned()
                .collect())
        }

        async fn upload_file(
            &self,
            request: UploadRequest,
        ) -> Result<UploadAck, ApplicationError> {
            tokio::time::sleep(UPLOAD_LATENCY).await;
            let name = request.name.clone();
            self.uploads.lock().unwrap().push(request);
            if self.fail_uploads.load(Ordering::SeqCst) {
                return Err(ApplicationError::Provider("disk full".to_string()));
            }
            Ok(UploadAck {
                id: Some("99".to_string()),
                name: Some(name),
                ..Default::default()
            })
        }

        async fn record_download(&self, file_id: &str) -> Result<(), ApplicationError> {
            if !self.files.iter().any(|f| f.id == file_id) {
                return Err(ApplicationError::NotFound(file_id.to_string()));
            }
            self.downloads.lock().unwrap().push(file_id.to_string());
            Ok(())
        }

        async fn fetch_history(&self) -> Result<Vec<DownloadHistoryEntry>, ApplicationError> {
            self.history_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.history.clone())
        }
    }

    pub(crate) fn controller(api: Arc<FakeApi>) -> ViewController {
        ViewController::new(api, Arc::new(StaticIdentity::new("alex")))
    }

    fn text_file(name: &str) -> LocalFile {
        LocalFile::from_bytes(name, b"quarterly numbers".to_vec())
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_upload_progress_sequence() {
        let api = Arc::new(FakeApi::with_catalog());
        let view = controller(api.clone());

        let task = view.select_file(text_file("report.txt")).unwrap();
        let snapshot = view.snapshot();
        assert_eq!(snapshot.upload_phase, UploadPhase::InProgress);
        assert_eq!(snapshot.upload_progress, 0);

        // Sample between timer deadlines until the request returns.
        let mut samples = Vec::new();
        tokio::time::sleep(Duration::from_millis(25)).await;
        while view.snapshot().upload_phase == UploadPhase::InProgress {
            samples.push(view.snapshot().upload_progress);
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        assert_eq!(samples.first(), Some(&0));
        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(samples.iter().max(), Some(&90));

        let snapshot = view.snapshot();
        assert_eq!(snapshot.upload_phase, UploadPhase::Completed);
        assert_eq!(snapshot.upload_progress, 100);
        let reached_full = Instant::now();

        let ack = task.await.unwrap().unwrap();
        assert_eq!(ack.id.as_deref(), Some("99"));
        assert!(reached_full.elapsed() <= Duration::from_millis(1_100));

        let snapshot = view.snapshot();
        assert_eq!(snapshot.upload_phase, UploadPhase::Idle);
        assert_eq!(snapshot.upload_progress, 100);
        assert_eq!(snapshot.files.len(), 5);

        let notifications = view.take_notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].level, NotificationLevel::Success);
        assert_eq!(api.list_calls.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_upload_resets_immediately() {
        let api = Arc::new(FakeApi::with_catalog());
        api.fail_uploads.store(true, Ordering::SeqCst);
        let view = controller(api.clone());
        view.mount().await.unwrap();
        let files_before = view.snapshot().files;

        let started = Instant::now();
        let err = view.upload(text_file("report.txt")).await.unwrap_err();
        assert_eq!(err, ApplicationError::Provider("disk full".to_string()));
        assert!(started.elapsed() < UPLOAD_LATENCY + Duration::from_millis(100));

        let snapshot = view.snapshot();
        assert_eq!(snapshot.upload_phase, UploadPhase::Idle);
        assert_eq!(snapshot.upload_progress, 0);
        assert_eq!(snapshot.files, files_before);

        // The timer is gone: nothing moves afterwards.
        tokio::time::sleep(Duration::from_millis(1_000)).await;
        assert_eq!(view.snapshot().upload_progress, 0);

        let notifications = view.take_notifications();
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].is_error());
        assert_eq!(notifications[0].title, "Upload failed");
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreadable_file_fails_upload() {
        let api = Arc::new(FakeApi::with_catalog());
        let view = controller(api.clone());

        let missing = std::env::temp_dir().join(format!("filehub-{}.bin", uuid::Uuid::new_v4()));
        let err = view.upload(LocalFile::from_path(missing)).await.unwrap_err();

        assert!(matches!(err, ApplicationError::Encoding(_)));
        assert!(api.uploads.lock().unwrap().is_empty());
        assert_eq!(view.snapshot().upload_phase, UploadPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_upload_is_rejected() {
        let api = Arc::new(FakeApi::with_catalog());
        let view = controller(api.clone());

        let first = view.select_file(text_file("first.txt")).unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        let progress_before = view.snapshot().upload_progress;

        let err = view.upload(text_file("second.txt")).await.unwrap_err();
        assert_eq!(err, ApplicationError::UploadInProgress);
        let snapshot = view.snapshot();
        assert_eq!(snapshot.upload_phase, UploadPhase::InProgress);
        assert_eq!(snapshot.upload_progress, progress_before);

        // Still rejected while the bar sits at 100%.
        tokio::time::sleep(UPLOAD_LATENCY).await;
        assert_eq!(view.snapshot().upload_phase, UploadPhase::Completed);
        assert!(view.select_file(text_file("third.txt")).is_err());

        first.await.unwrap().unwrap();
        let uploads = api.uploads.lock().unwrap();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].name, "first.txt");
    }

    #[tokio::test(start_paused = true)]
    async fn test_upload_uses_selected_category() {
        let api = Arc::new(FakeApi::with_catalog());
        let view = controller(api.clone());

        view.upload(text_file("a.txt")).await.unwrap();
        view.select_category(Category::Design).await.unwrap();
        view.upload(text_file("b.txt")).await.unwrap();

        let uploads = api.uploads.lock().unwrap();
        assert_eq!(uploads[0].category, Category::Other);
        assert_eq!(uploads[1].category, Category::Design);
    }

    #[tokio::test]
    async fn test_category_and_search_filtering() {
        let api = Arc::new(FakeApi::with_catalog());
        let view = controller(api.clone());
        view.mount().await.unwrap();

        view.select_category(Category::Documents).await.unwrap();
        view.set_search_query("Report");

        let visible = view.visible_files();
        let names: Vec<_> = visible.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Annual_Report.xlsx", "quarterly-report.docx"]);
        assert!(visible.iter().all(|f| f.category == "Документы"));

        assert_eq!(
            api.list_calls.lock().unwrap().as_slice(),
            [Some(Category::All), Some(Category::Documents)]
        );
    }

    #[tokio::test]
    async fn test_reselecting_category_does_not_refetch() {
        let api = Arc::new(FakeApi::with_catalog());
        let view = controller(api.clone());

        view.select_category(Category::Video).await.unwrap();
        view.select_category(Category::Video).await.unwrap();
        assert_eq!(api.list_calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_list() {
        let api = Arc::new(FakeApi::with_catalog());
        let view = controller(api.clone());
        view.mount().await.unwrap();
        let before = view.snapshot().files;

        api.fail_lists.store(true, Ordering::SeqCst);
        assert!(view.select_category(Category::Archives).await.is_err());

        let snapshot = view.snapshot();
        assert_eq!(snapshot.files, before);
        assert_eq!(snapshot.category, Category::Archives);
        let notifications = view.take_notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].title, "Could not load files");
    }

    #[tokio::test]
    async fn test_entering_profile_fetches_history() {
        let api = Arc::new(FakeApi::with_catalog());
        let view = controller(api.clone());
        view.mount().await.unwrap();

        view.select_tab(Tab::Profile).await.unwrap();
        view.select_tab(Tab::Profile).await.unwrap();
        assert_eq!(api.history_calls.load(Ordering::SeqCst), 1);

        view.select_tab(Tab::Catalog).await.unwrap();
        view.select_tab(Tab::Profile).await.unwrap();
        assert_eq!(api.history_calls.load(Ordering::SeqCst), 2);

        let stats = view.profile_stats();
        assert_eq!(stats.uploaded_files, 2);
        assert_eq!(stats.total_downloads, 2);
        assert_eq!(stats.history_entries, 1);
    }

    #[tokio::test]
    async fn test_profile_stats_ignore_catalog_category() {
        let api = Arc::new(FakeApi::with_catalog());
        let view = controller(api.clone());
        view.mount().await.unwrap();
        view.select_tab(Tab::Profile).await.unwrap();
        let stats = view.profile_stats();

        view.select_category(Category::Archives).await.unwrap();

        assert!(view.visible_files().iter().all(|f| f.category == "Архивы"));
        assert_eq!(view.profile_stats(), stats);
        assert_eq!(stats.uploaded_files, 2);
        assert_eq!(stats.total_downloads, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_aborted_upload_still_settles_and_refetches() {
        let api = Arc::new(FakeApi::with_catalog());
        let view = controller(api.clone());

        let uploader = view.clone();
        let task = tokio::spawn(async move { uploader.upload(text_file("report.txt")).await });
        tokio::time::sleep(UPLOAD_LATENCY + Duration::from_millis(100)).await;
        assert_eq!(view.snapshot().upload_phase, UploadPhase::Completed);

        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());
        assert_eq!(view.snapshot().upload_progress, 100);

        tokio::time::sleep(Duration::from_millis(1_000)).await;
        let snapshot = view.snapshot();
        assert_eq!(snapshot.upload_phase, UploadPhase::Idle);
        assert_eq!(snapshot.upload_progress, 100);
        assert_eq!(snapshot.files.len(), 5);
        assert_eq!(api.list_calls.lock().unwrap().len(), 1);
        assert!(view.select_file(text_file("next.txt")).is_ok());
    }

    #[tokio::test]
    async fn test_download_records_and_refreshes() {
        let api = Arc::new(FakeApi::with_catalog());
        let view = controller(api.clone());
        view.mount().await.unwrap();
        view.select_tab(Tab::Profile).await.unwrap();

        view.download("2").await.unwrap();

        assert_eq!(api.downloads.lock().unwrap().as_slice(), ["2"]);
        assert_eq!(
            api.list_calls.lock().unwrap().as_slice(),
            [
                Some(Category::All),
                Some(Category::All),
                Some(Category::All),
                Some(Category::All)
            ]
        );
        assert_eq!(api.history_calls.load(Ordering::SeqCst), 2);
        let notifications = view.take_notifications();
        assert_eq!(notifications[0].description, "Project_Assets.zip");
    }

    #[tokio::test]
    async fn test_failed_download_notifies() {
        let api = Arc::new(FakeApi::with_catalog());
        let view = controller(api.clone());

        let err = view.download("404").await.unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(_)));
        assert!(api.list_calls.lock().unwrap().is_empty());
        assert_eq!(view.take_notifications()[0].title, "Download failed");
    }
}
