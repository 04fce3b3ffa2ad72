mod drop_zone;
mod progress_ticker;
mod view_controller;

pub use progress_ticker::ProgressTicker;
pub use view_controller::{UploadTask, ViewController};
