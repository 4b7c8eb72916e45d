//! webpaint-document: configuration and image persistence for WebPaint.
//!
//! - `config`: the editor configuration, stored as JSON.
//! - `export`: PNG encoding of the committed surface and the "download" step.
//! - `import`: decoding arbitrary raster images and scaling them onto a surface.

use thiserror::Error;

pub mod config;
pub mod export;
pub mod import;

pub use config::{load_config, save_config, ConfigError, EditorConfig, FillStrategy};
pub use export::{encode_png, save_png, DEFAULT_EXPORT_FILENAME};
pub use import::{decode_image, scale_to_fill};

/// Errors while converting between surfaces and encoded images.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("could not decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("could not encode png: {0}")]
    Encode(#[source] image::ImageError),

    #[error("decoded image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}
