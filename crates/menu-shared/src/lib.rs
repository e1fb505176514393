//! # Menu Shared
//!
//! Configuration, telemetry and constants shared by the menu site crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;

pub use config::AppConfig;
pub use error::AppError;
