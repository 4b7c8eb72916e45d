// Surface-local coordinates.

use serde::{Deserialize, Serialize};

/// A point in surface-local pixel space. The host translates device and
/// window coordinates before anything reaches the core.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// The pixel containing this point, if it has non-negative coordinates.
    pub fn to_pixel(self) -> Option<(u32, u32)> {
        if !(self.x.is_finite() && self.y.is_finite()) || self.x < 0.0 || self.y < 0.0 {
            return None;
        }
        Some((self.x.floor() as u32, self.y.floor() as u32))
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point { x, y }
    }
}
