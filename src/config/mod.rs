//! Configuration management

mod settings;

pub use settings::{AppConfig, DriverConfig, CONFIG_VERSION};
