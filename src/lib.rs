//! omnik-sens: Field registry and sensor binding for Omnik solar equipment
//!
//! This library ties the workspace together:
//! - Configuration loading (driver units and per-field overrides)
//! - Setup of every configured unit against one sensor registry

pub mod config;
pub mod setup;

// Re-export commonly used types
pub use config::{AppConfig, DriverConfig};
pub use setup::{configure_all, Summary};
