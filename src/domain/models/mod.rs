pub mod category;
pub mod file;
pub mod history;
pub mod upload;
