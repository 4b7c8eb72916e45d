//! webpaint-core: pixel surfaces, colors and drawing primitives for WebPaint.
//!
//! Design rules:
//! - Pixels are 8-bit straight-alpha RGBA, stored densely (W x H x 4 bytes).
//! - Drawing is immediate-mode: every primitive rasterizes straight into a surface.
//! - Out-of-bounds coordinates are clipped, never fatal.
//! - Each primitive covers a pixel at most once, so translucent colors blend once.

use thiserror::Error;

pub mod color;
pub mod geometry;
pub mod raster;
pub mod style;
pub mod surface;

pub use color::Color;
pub use geometry::Point;
pub use style::{Style, StylePanel, Tool, ToolKind};
pub use surface::{PixelSurface, PreviewSurface, Surface};

/// Errors raised while validating drawing inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaintError {
    #[error("invalid color: {input:?}")]
    InvalidColor { input: String },

    #[error("stroke width must be a positive finite number, got {value}")]
    InvalidStrokeWidth { value: f32 },

    #[error("surface dimensions must be positive: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}
