pub mod client;
pub mod simulation;
