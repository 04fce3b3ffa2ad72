pub mod controllers;
pub mod error;
pub mod notifications;
pub mod state;
