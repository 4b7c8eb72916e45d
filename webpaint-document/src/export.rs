//! PNG export of the committed surface.

use anyhow::Context;
use image::ImageFormat;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use webpaint_core::PixelSurface;

use crate::DocumentError;

/// Filename used when the host does not configure one.
pub const DEFAULT_EXPORT_FILENAME: &str = "imageWebPaint.png";

/// Encode the surface as PNG bytes.
pub fn encode_png(surface: &PixelSurface) -> Result<Vec<u8>, DocumentError> {
    let mut bytes = Vec::new();
    surface
        .as_image()
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(DocumentError::Encode)?;
    tracing::debug!(
        width = surface.as_image().width(),
        height = surface.as_image().height(),
        bytes = bytes.len(),
        "encoded png"
    );
    Ok(bytes)
}

/// Write already-encoded PNG bytes into `dir` under `filename`, the headless
/// counterpart of a browser download. Returns the written path.
pub fn save_png(dir: impl AsRef<Path>, filename: &str, png: &[u8]) -> anyhow::Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("create export dir: {}", dir.display()))?;

    let path = dir.join(filename);
    fs::write(&path, png).with_context(|| format!("write png: {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = png.len(), "image saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use webpaint_core::{Color, Surface};

    #[test]
    fn test_encode_png_signature() {
        let surface = PixelSurface::new(3, 2, Color::WHITE).unwrap();
        let png = encode_png(&surface).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_encoded_pixels_survive() {
        let mut surface = PixelSurface::new(4, 4, Color::WHITE).unwrap();
        surface.put_pixel(2, 1, Color::rgba(10, 20, 30, 40));
        let png = encode_png(&surface).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(2, 1).0, [10, 20, 30, 40]);
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }
}
