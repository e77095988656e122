//! QR decoding over luma images.

use std::path::Path;

use image::GrayImage;

use super::error::DecoderError;
use super::region::ScanConfig;

/// Decode the first readable QR code in `image`.
pub fn decode_luma(image: &GrayImage) -> Option<String> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
            image.get_pixel(x as u32, y as u32).0[0]
        });

    for grid in prepared.detect_grids() {
        match grid.decode() {
            Ok((_meta, content)) => return Some(content),
            Err(err) => tracing::trace!(error = ?err, "Grid found but not decodable"),
        }
    }
    None
}

/// Decode only the capture region of a camera frame.
pub fn decode_frame(frame: &GrayImage, config: &ScanConfig) -> Option<String> {
    let region = config.region(frame.width(), frame.height());
    if region.width == 0 || region.height == 0 {
        return None;
    }
    let cropped =
        image::imageops::crop_imm(frame, region.x, region.y, region.width, region.height)
            .to_image();
    decode_luma(&cropped)
}

/// Decode a code from an image file, searching the whole picture.
pub fn decode_file(path: &Path) -> Result<String, DecoderError> {
    let image = image::open(path).map_err(|e| DecoderError::Image {
        reason: e.to_string(),
    })?;
    let luma = image.to_luma8();
    match decode_luma(&luma) {
        Some(text) => {
            tracing::debug!(path = %path.display(), "Decoded code from image");
            Ok(text)
        }
        None => Err(DecoderError::NoCodeFound),
    }
}
