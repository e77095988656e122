use thiserror::Error;

/// Errors produced while acquiring or decoding a code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecoderError {
    /// The frame source could not be opened (missing device, permissions).
    #[error("Camera unavailable: {reason}")]
    CameraUnavailable { reason: String },

    /// A scan is already holding the camera.
    #[error("Scanner is already running")]
    AlreadyScanning,

    /// The frame source disappeared while scanning.
    #[error("Camera lost: {reason}")]
    SourceLost { reason: String },

    /// The image was read but contains no decodable code.
    #[error("No QR code found")]
    NoCodeFound,

    /// The image file could not be read or decoded.
    #[error("Could not read image: {reason}")]
    Image { reason: String },
}

impl DecoderError {
    /// Text suitable for the status line.
    pub fn user_message(&self) -> String {
        match self {
            DecoderError::CameraUnavailable { .. } => {
                "Could not start the scanner. Check the camera source and its permissions."
                    .to_string()
            }
            DecoderError::AlreadyScanning => "The scanner is already running.".to_string(),
            DecoderError::SourceLost { .. } => "The camera stopped responding.".to_string(),
            DecoderError::NoCodeFound => "No QR code was found in that image.".to_string(),
            DecoderError::Image { reason } => format!("Could not read that image: {}", reason),
        }
    }
}
