//! Camera-mode scanning.
//!
//! A [`CameraScanner`] owns at most one running scan. The scan thread holds
//! the [`FrameSource`]; the source is released when the thread exits, whether
//! it found a code, was stopped, or panicked.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::SystemTime;

use image::GrayImage;

use super::decode::{decode_file, decode_frame};
use super::error::DecoderError;
use super::region::ScanConfig;
use super::{DecodeCallback, Decoder};

/// Produces camera frames.
pub trait FrameSource: Send {
    /// Next frame, or `None` when nothing new is available yet.
    fn grab(&mut self) -> Result<Option<GrayImage>, DecoderError>;
}

/// Opens a fresh frame source for each scan.
pub type SourceFactory = Box<dyn Fn() -> Result<Box<dyn FrameSource>, DecoderError> + Send>;

/// Frames read from an image file that a capture tool keeps overwriting.
pub struct SnapshotSource {
    path: PathBuf,
    last_modified: Option<SystemTime>,
}

impl SnapshotSource {
    pub fn open(path: &Path) -> Result<Self, DecoderError> {
        std::fs::File::open(path).map_err(|e| DecoderError::CameraUnavailable {
            reason: format!("{}: {}", path.display(), e),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            last_modified: None,
        })
    }
}

impl FrameSource for SnapshotSource {
    fn grab(&mut self) -> Result<Option<GrayImage>, DecoderError> {
        let modified = std::fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .map_err(|e| DecoderError::SourceLost {
                reason: format!("{}: {}", self.path.display(), e),
            })?;

        if self.last_modified == Some(modified) {
            return Ok(None);
        }

        match image::open(&self.path) {
            Ok(frame) => {
                self.last_modified = Some(modified);
                Ok(Some(frame.to_luma8()))
            }
            Err(err) => {
                // Usually a frame caught mid-write; the next poll retries.
                tracing::trace!(error = %err, "Skipping unreadable frame");
                Ok(None)
            }
        }
    }
}

struct ActiveScan {
    stop_tx: mpsc::Sender<()>,
    thread: JoinHandle<()>,
}

/// Decoder that polls a frame source at the configured frame rate.
pub struct CameraScanner {
    open_source: SourceFactory,
    active: Option<ActiveScan>,
    busy: Arc<AtomicBool>,
}

impl CameraScanner {
    pub fn new(open_source: SourceFactory) -> Self {
        Self {
            open_source,
            active: None,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Scanner reading snapshots from `path`.
    pub fn snapshot(path: PathBuf) -> Self {
        Self::new(Box::new(move || {
            SnapshotSource::open(&path).map(|source| Box::new(source) as Box<dyn FrameSource>)
        }))
    }

    /// Scanner for setups without a camera; starting it always fails.
    pub fn unavailable() -> Self {
        Self::new(Box::new(|| {
            Err(DecoderError::CameraUnavailable {
                reason: "no camera source configured".to_string(),
            })
        }))
    }

    /// Join a scan thread that already finished on its own.
    fn reap_finished(&mut self) {
        if self.busy.load(Ordering::SeqCst) {
            return;
        }
        if let Some(active) = self.active.take() {
            let _ = active.thread.join();
        }
    }
}

impl Decoder for CameraScanner {
    fn start(&mut self, config: &ScanConfig, on_decoded: DecodeCallback) -> Result<(), DecoderError> {
        self.reap_finished();
        if self.active.is_some() {
            return Err(DecoderError::AlreadyScanning);
        }

        let mut source = (self.open_source)()?;
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let config = *config;
        let interval = config.frame_interval();

        self.busy.store(true, Ordering::SeqCst);
        let busy = scopeguard::guard(Arc::clone(&self.busy), |flag| {
            flag.store(false, Ordering::SeqCst);
        });

        let thread = thread::Builder::new()
            .name("qr-camera".to_string())
            .spawn(move || {
                let _busy = busy;
                let outcome = loop {
                    match source.grab() {
                        Ok(Some(frame)) => {
                            if let Some(text) = decode_frame(&frame, &config) {
                                break Some(Ok(text));
                            }
                        }
                        Ok(None) => {}
                        Err(err) => break Some(Err(err)),
                    }
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        // Stop requested or scanner dropped.
                        _ => break None,
                    }
                };
                drop(source);
                if let Some(outcome) = outcome {
                    on_decoded(outcome);
                }
            })
            .map_err(|e| DecoderError::CameraUnavailable {
                reason: format!("failed to spawn scanner thread: {}", e),
            })?;

        tracing::info!(fps = config.fps, "Camera scan started");
        self.active = Some(ActiveScan { stop_tx, thread });
        Ok(())
    }

    fn stop(&mut self) -> Result<(), DecoderError> {
        let Some(active) = self.active.take() else {
            return Ok(());
        };
        let _ = active.stop_tx.send(());
        active.thread.join().map_err(|_| DecoderError::SourceLost {
            reason: "scanner thread panicked".to_string(),
        })?;
        tracing::info!("Camera scan stopped");
        Ok(())
    }

    fn is_scanning(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    fn scan_file(&self, path: &Path) -> Result<String, DecoderError> {
        decode_file(path)
    }
}

impl Drop for CameraScanner {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            tracing::warn!(error = %err, "Failed to stop camera scan on drop");
        }
    }
}
