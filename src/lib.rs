pub mod config;
pub mod consolidate;
pub mod error;
pub mod telemetry;
