use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Remote game API settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Web app endpoint that accepts `{ action, ...fields }` requests.
    #[serde(default)]
    pub endpoint: String,
}

/// QR scanner settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Frames decoded per second in camera mode (default: 10).
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Capture region: fraction of the shorter frame edge, or pixels.
    #[serde(default)]
    pub qrbox: QrBox,
    /// Snapshot image kept fresh by an external capture tool.
    #[serde(default)]
    pub camera_source: Option<PathBuf>,
}

/// Size of the centered square that is searched for a code.
///
/// Integers in TOML are read as pixels, floats as a fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QrBox {
    Pixels(u32),
    Fraction(f32),
}

/// Terminal UI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long a status message stays visible (default: 4000).
    #[serde(default = "default_message_ttl_ms")]
    pub message_ttl_ms: u64,
    /// Event loop tick in milliseconds (default: 250).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

/// Session persistence settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Override for the session file location.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_fps() -> u32 {
    10
}

fn default_qrbox_fraction() -> f32 {
    0.7
}

fn default_message_ttl_ms() -> u64 {
    4000
}

fn default_tick_rate_ms() -> u64 {
    250
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            qrbox: QrBox::default(),
            camera_source: None,
        }
    }
}

impl Default for QrBox {
    fn default() -> Self {
        QrBox::Fraction(default_qrbox_fraction())
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            message_ttl_ms: default_message_ttl_ms(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}
