//! QR code acquisition.
//!
//! The [`Decoder`] trait is the seam between the scan workflow and whatever
//! turns pixels into text. [`CameraScanner`] is the shipped implementation:
//! it polls a [`FrameSource`] in camera mode and decodes files directly in
//! image mode.

mod camera;
mod decode;
mod error;
mod region;

use std::path::Path;

pub use camera::{CameraScanner, FrameSource, SnapshotSource, SourceFactory};
pub use decode::{decode_file, decode_frame, decode_luma};
pub use error::DecoderError;
pub use region::{Region, ScanConfig};

/// Receives the single result of a camera scan.
///
/// `FnOnce` makes "at most one value per start" a property of the type.
pub type DecodeCallback = Box<dyn FnOnce(Result<String, DecoderError>) + Send + 'static>;

/// A non-reentrant code decoder.
pub trait Decoder: Send {
    /// Start watching the camera. Fails with [`DecoderError::AlreadyScanning`]
    /// while a previous scan still holds it.
    fn start(&mut self, config: &ScanConfig, on_decoded: DecodeCallback) -> Result<(), DecoderError>;

    /// Stop watching and release the camera. A no-op when idle.
    fn stop(&mut self) -> Result<(), DecoderError>;

    fn is_scanning(&self) -> bool;

    /// Decode a single image file.
    fn scan_file(&self, path: &Path) -> Result<String, DecoderError>;
}
