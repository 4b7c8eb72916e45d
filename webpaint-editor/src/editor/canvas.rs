// The drawing canvas: the committed surface plus the preview overlay that
// sits on top of it while a shape is being dragged out.

use image::{imageops, RgbaImage};
use tracing::{info, trace};
use webpaint_core::{Color, PaintError, PixelSurface, PreviewSurface, Surface};

use crate::editor::history::Snapshot;

#[derive(Debug, Clone)]
pub struct Canvas {
    surface: PixelSurface,
    preview: PreviewSurface,
    background: Color,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self, PaintError> {
        info!(
            "Creating new canvas of size {}x{} with background color {}",
            width, height, background
        );

        let surface = PixelSurface::new(width, height, background)?;
        let preview = PreviewSurface::new(width, height)?;
        trace!("Canvas created");

        Ok(Self {
            surface,
            preview,
            background,
        })
    }

    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut PixelSurface {
        &mut self.surface
    }

    pub fn preview(&self) -> &PreviewSurface {
        &self.preview
    }

    pub fn preview_mut(&mut self) -> &mut PreviewSurface {
        &mut self.preview
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    // Paint the committed surface with the background and drop any preview
    pub fn clear(&mut self) {
        info!("Clearing canvas");
        self.surface.fill(self.background);
        self.preview.clear();
        trace!("Canvas cleared");
    }

    /// Reallocate both surfaces. Committed content stays anchored at the
    /// top-left corner; area beyond the old bounds becomes background.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), PaintError> {
        info!(
            "Resizing canvas from {}x{} to {}x{}",
            self.width(),
            self.height(),
            width,
            height
        );
        // Validate both before touching either so a bad size leaves us intact.
        let preview = PreviewSurface::new(width, height)?;
        self.surface.resize(width, height, self.background)?;
        self.preview = preview;
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.surface)
    }

    pub fn restore(&mut self, snapshot: &Snapshot) {
        trace!("Restoring snapshot {:?}", snapshot.dimensions());
        self.surface.restore(snapshot.image(), self.background);
        self.preview.clear();
    }

    /// What the user sees: committed pixels with the preview overlay on top.
    pub fn composited(&self) -> RgbaImage {
        let mut out = self.surface.as_image().clone();
        if !self.preview.is_blank() {
            imageops::overlay(&mut out, self.preview.as_image(), 0, 0);
        }
        out
    }
}
