use tracing::debug;

use crate::{
    adapters::controllers::view_controller::{UploadTask, ViewController},
    application::error::ApplicationError,
    domain::models::upload::LocalFile,
};

impl ViewController {
    pub fn drag_enter(&self) {
        self.state().dragging = true;
    }

    pub fn drag_over(&self) {
        self.state().dragging = true;
    }

    pub fn drag_leave(&self) {
        self.state().dragging = false;
    }

    /// Handles a drop on the upload zone. Only the first file is uploaded;
    /// an empty drop just clears the highlight.
    pub fn drop_files(
        &self,
        files: Vec<LocalFile>,
    ) -> Result<Option<UploadTask>, ApplicationError> {
        self.state().dragging = false;

        let count = files.len();
        let Some(first) = files.into_iter().next() else {
            return Ok(None);
        };
        if count > 1 {
            debug!("Dropped {} files, uploading only {}", count, first.name);
        }

        self.select_file(first).map(Some)
    }
}
