pub mod download_dto;
pub mod file_dto;
pub mod history_dto;
pub mod upload_dto;
