pub mod config;
pub mod error;
pub mod reports;
pub mod store;
pub mod telemetry;
