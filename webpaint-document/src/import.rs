//! Decoding images picked by the user and fitting them to the canvas.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::DocumentError;

/// Decode any format the `image` crate recognizes into RGBA8.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, DocumentError> {
    let decoded = image::load_from_memory(bytes).map_err(|err| {
        tracing::warn!(error = %err, bytes = bytes.len(), "image decode failed");
        DocumentError::Decode(err)
    })?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(DocumentError::EmptyImage { width, height });
    }
    tracing::debug!(width, height, "decoded image");
    Ok(rgba)
}

/// Stretch `image` to exactly `width` x `height`, ignoring aspect ratio.
pub fn scale_to_fill(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, FilterType::Triangle)
}
