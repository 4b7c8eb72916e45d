// Flood fill for the Fill tool.

use tracing::{debug, trace, warn};
use webpaint_core::{Color, Point, Surface};
use webpaint_document::FillStrategy;

/// Side of the square blocks painted by [`FillStrategy::Block4`].
const BLOCK: u32 = 4;

#[derive(Debug, Clone, Copy, Default)]
pub struct FloodFiller {
    pub strategy: FillStrategy,
}

impl FloodFiller {
    pub fn new(strategy: FillStrategy) -> Self {
        Self { strategy }
    }

    /// Replace the region of `origin`'s color that contains `origin` with
    /// `color`. Returns the number of pixels painted.
    pub fn fill<S: Surface + ?Sized>(&self, surface: &mut S, origin: Point, color: Color) -> usize {
        trace!(
            "Starting flood fill at {:?} with color {} ({:?})",
            origin,
            color,
            self.strategy
        );

        let Some((x, y)) = origin.to_pixel().filter(|&(x, y)| surface.contains(x, y)) else {
            warn!(x = origin.x, y = origin.y, "fill origin outside surface");
            return 0;
        };

        // Get the target color (what we're replacing)
        let Some(target) = surface.pixel(x, y) else {
            return 0;
        };

        // If target is already the fill color, nothing to do
        if target == color {
            debug!("Target color already matches fill color, skipping fill");
            return 0;
        }

        let painted = match self.strategy {
            FillStrategy::PixelExact => fill_pixels(surface, x, y, target, color),
            FillStrategy::Block4 => fill_blocks(surface, x, y, target, color),
        };
        debug!("Flood fill completed, {} pixels painted", painted);
        painted
    }
}

/// 4-connected fill with an explicit stack and a visited bitmap.
fn fill_pixels<S: Surface + ?Sized>(surface: &mut S, x: u32, y: u32, target: Color, replacement: Color) -> usize {
    let (w, h) = surface.bounds();
    let index = |x: u32, y: u32| (y as usize) * (w as usize) + x as usize;
    let mut visited = vec![false; w as usize * h as usize];
    let mut stack = vec![(x, y)];
    visited[index(x, y)] = true;
    let mut painted = 0;

    while let Some((x, y)) = stack.pop() {
        surface.put_pixel(x, y, replacement);
        painted += 1;

        let neighbors = [
            (x.checked_sub(1), Some(y)),
            (Some(x + 1).filter(|&nx| nx < w), Some(y)),
            (Some(x), y.checked_sub(1)),
            (Some(x), Some(y + 1).filter(|&ny| ny < h)),
        ];
        for (nx, ny) in neighbors {
            let (Some(nx), Some(ny)) = (nx, ny) else {
                continue;
            };
            let i = index(nx, ny);
            if !visited[i] && surface.pixel(nx, ny) == Some(target) {
                visited[i] = true;
                stack.push((nx, ny));
            }
        }
    }

    painted
}

/// Block-quantized fill: paints 4x4 blocks, stepping 4 pixels along each
/// axis, sampling only each block's top-left pixel. Cheap, but can leave
/// fringes up to 3px wide and cross boundaries thinner than a block.
fn fill_blocks<S: Surface + ?Sized>(surface: &mut S, x: u32, y: u32, target: Color, replacement: Color) -> usize {
    let (w, h) = surface.bounds();
    // Every visited block shares the origin's offset modulo BLOCK, so x / BLOCK
    // and y / BLOCK identify a block uniquely.
    let cols = w.div_ceil(BLOCK) as usize;
    let rows = h.div_ceil(BLOCK) as usize;
    let index = |x: u32, y: u32| (y / BLOCK) as usize * cols + (x / BLOCK) as usize;
    let mut visited = vec![false; cols * rows];
    let mut stack = vec![(x, y)];
    let mut painted = 0;

    while let Some((x, y)) = stack.pop() {
        let i = index(x, y);
        if visited[i] || surface.pixel(x, y) != Some(target) {
            continue;
        }
        visited[i] = true;

        surface.set_pixel_block(x, y, BLOCK, replacement);
        painted += (BLOCK.min(w - x) * BLOCK.min(h - y)) as usize;

        if x >= BLOCK {
            stack.push((x - BLOCK, y));
        }
        if x + BLOCK < w {
            stack.push((x + BLOCK, y));
        }
        if y >= BLOCK {
            stack.push((x, y - BLOCK));
        }
        if y + BLOCK < h {
            stack.push((x, y + BLOCK));
        }
    }

    painted
}
