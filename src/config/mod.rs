//! Configuration loading and validation.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{ApiConfig, Config, QrBox, ScannerConfig, SessionConfig, UiConfig};
