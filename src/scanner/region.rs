use std::time::Duration;

use crate::config::{QrBox, ScannerConfig};

/// Settings handed to a decoder when it starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanConfig {
    pub fps: u32,
    pub qrbox: QrBox,
}

/// Rectangle inside a frame, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ScanConfig {
    /// Time between two decode attempts.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }

    /// Centered square searched for a code in a `width` x `height` frame.
    ///
    /// A fractional box is measured against the shorter edge; a pixel box is
    /// clamped to it.
    pub fn region(&self, width: u32, height: u32) -> Region {
        let min_edge = width.min(height);
        let side = match self.qrbox {
            QrBox::Pixels(px) => px.min(min_edge),
            QrBox::Fraction(f) => ((min_edge as f32) * f).floor() as u32,
        };
        let side = side.clamp(min_edge.min(1), min_edge);
        Region {
            x: (width - side) / 2,
            y: (height - side) / 2,
            width: side,
            height: side,
        }
    }
}

impl From<&ScannerConfig> for ScanConfig {
    fn from(config: &ScannerConfig) -> Self {
        Self {
            fps: config.fps,
            qrbox: config.qrbox,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::from(&ScannerConfig::default())
    }
}
