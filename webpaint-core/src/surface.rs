// Raster surfaces: the committed canvas and the preview overlay.

use image::{imageops, Rgba, RgbaImage};
use tracing::{debug, info, trace, warn};

use crate::{raster, Color, PaintError, Point};

/// Immediate-mode drawing target. Implementors supply pixel access; the
/// drawing operations are shared.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn pixel(&self, x: u32, y: u32) -> Option<Color>;

    /// Overwrite a pixel. Returns `false` when (x, y) is outside the surface.
    fn put_pixel(&mut self, x: u32, y: u32, color: Color) -> bool;

    fn bounds(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width() && y < self.height()
    }

    /// Composite `color` over the existing pixel.
    fn blend_pixel(&mut self, x: u32, y: u32, color: Color) -> bool {
        match self.pixel(x, y) {
            Some(dst) => self.put_pixel(x, y, color.over(dst)),
            None => false,
        }
    }

    /// Overwrite every pixel with one color.
    fn fill(&mut self, color: Color) {
        let (w, h) = self.bounds();
        for y in 0..h {
            for x in 0..w {
                self.put_pixel(x, y, color);
            }
        }
    }

    /// Round-capped segment; a zero-length segment paints a dot.
    fn draw_line(&mut self, from: Point, to: Point, width: f32, color: Color) {
        trace!(?from, ?to, width, %color, "draw_line");
        let bounds = self.bounds();
        raster::capsule(from, to, width, bounds, |x, y| {
            self.blend_pixel(x, y, color);
        });
    }

    fn stroke_rect(&mut self, a: Point, b: Point, width: f32, color: Color) {
        trace!(?a, ?b, width, %color, "stroke_rect");
        let bounds = self.bounds();
        raster::rect_stroke(a, b, width, bounds, |x, y| {
            self.blend_pixel(x, y, color);
        });
    }

    fn fill_rect(&mut self, a: Point, b: Point, color: Color) {
        trace!(?a, ?b, %color, "fill_rect");
        let bounds = self.bounds();
        raster::rect_fill(a, b, bounds, |x, y| {
            self.blend_pixel(x, y, color);
        });
    }

    fn stroke_ellipse(&mut self, center: Point, rx: f32, ry: f32, width: f32, color: Color) {
        trace!(?center, rx, ry, width, %color, "stroke_ellipse");
        let bounds = self.bounds();
        raster::ellipse_stroke(center, rx, ry, width, bounds, |x, y| {
            self.blend_pixel(x, y, color);
        });
    }

    fn fill_ellipse(&mut self, center: Point, rx: f32, ry: f32, color: Color) {
        trace!(?center, rx, ry, %color, "fill_ellipse");
        let bounds = self.bounds();
        raster::ellipse_fill(center, rx, ry, bounds, |x, y| {
            self.blend_pixel(x, y, color);
        });
    }

    /// Overwrite a `size` x `size` block whose top-left pixel is (x, y).
    fn set_pixel_block(&mut self, x: u32, y: u32, size: u32, color: Color) {
        let bounds = self.bounds();
        raster::block(x, y, size, bounds, |px, py| {
            self.put_pixel(px, py, color);
        });
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(), PaintError> {
    if width == 0 || height == 0 {
        warn!(width, height, "rejected zero-sized surface");
        return Err(PaintError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// The committed raster: a dense `width x height x 4` RGBA buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelSurface {
    image: RgbaImage,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self, PaintError> {
        check_dimensions(width, height)?;
        info!(width, height, %background, "creating pixel surface");
        Ok(Self {
            image: RgbaImage::from_pixel(width, height, background.into()),
        })
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Copy `source` onto the surface with its top-left corner at (x, y).
    /// Whatever falls outside the surface is clipped.
    pub fn blit(&mut self, source: &RgbaImage, x: i64, y: i64) {
        imageops::replace(&mut self.image, source, x, y);
    }

    /// Alpha-composite `source` over the surface with its top-left corner at
    /// (x, y). Whatever falls outside the surface is clipped.
    pub fn composite(&mut self, source: &RgbaImage, x: i64, y: i64) {
        imageops::overlay(&mut self.image, source, x, y);
    }

    /// Replace the whole contents with `source`. A source of the same size is
    /// copied as-is; otherwise the surface is cleared to `background` first
    /// and `source` is blitted at the origin.
    pub fn restore(&mut self, source: &RgbaImage, background: Color) {
        if source.dimensions() == self.image.dimensions() {
            self.image.clone_from(source);
        } else {
            debug!(
                from = ?source.dimensions(),
                to = ?self.image.dimensions(),
                "restoring mismatched buffer"
            );
            self.fill(background);
            self.blit(source, 0, 0);
        }
    }

    /// Reallocate at the new size, keeping the old content at the origin and
    /// painting newly exposed area with `background`.
    pub fn resize(&mut self, width: u32, height: u32, background: Color) -> Result<(), PaintError> {
        check_dimensions(width, height)?;
        debug!(
            old_width = self.image.width(),
            old_height = self.image.height(),
            width,
            height,
            "resizing pixel surface"
        );
        let mut resized = RgbaImage::from_pixel(width, height, background.into());
        imageops::replace(&mut resized, &self.image, 0, 0);
        self.image = resized;
        Ok(())
    }
}

impl Surface for PixelSurface {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image.get_pixel_checked(x, y).map(|px| Color::from(*px))
    }

    fn put_pixel(&mut self, x: u32, y: u32, color: Color) -> bool {
        match self.image.get_pixel_mut_checked(x, y) {
            Some(px) => {
                *px = color.into();
                true
            }
            None => {
                warn!(x, y, "attempted to set pixel outside surface");
                false
            }
        }
    }

    fn fill(&mut self, color: Color) {
        let px: Rgba<u8> = color.into();
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }
}

/// Transparent overlay for in-progress shapes. Holds nothing that survives
/// a gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSurface {
    image: RgbaImage,
    dirty: bool,
}

impl PreviewSurface {
    pub fn new(width: u32, height: u32) -> Result<Self, PaintError> {
        check_dimensions(width, height)?;
        Ok(Self {
            image: RgbaImage::new(width, height),
            dirty: false,
        })
    }

    pub fn clear(&mut self) {
        if self.dirty {
            trace!("clearing preview");
            self.image
                .pixels_mut()
                .for_each(|px| *px = Color::TRANSPARENT.into());
            self.dirty = false;
        }
    }

    /// True when nothing has been drawn since the last clear.
    pub fn is_blank(&self) -> bool {
        !self.dirty
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Reallocate at the new size. Preview content never survives a resize.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), PaintError> {
        check_dimensions(width, height)?;
        self.image = RgbaImage::new(width, height);
        self.dirty = false;
        Ok(())
    }
}

impl Surface for PreviewSurface {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image.get_pixel_checked(x, y).map(|px| Color::from(*px))
    }

    fn put_pixel(&mut self, x: u32, y: u32, color: Color) -> bool {
        match self.image.get_pixel_mut_checked(x, y) {
            Some(px) => {
                *px = color.into();
                self.dirty = true;
                true
            }
            None => false,
        }
    }
}
