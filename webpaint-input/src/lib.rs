// This defines the pointer events we accept from the host page.
// Mouse and touch events both collapse into one three-phase gesture stream
// so the editor never has to care which device produced them.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use webpaint_core::Point;

/// Keyboard modifiers held when a gesture started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
}

/// Raw host event, in page coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    MouseDown {
        x: f32,
        y: f32,
        #[serde(default)]
        modifiers: Modifiers,
    },
    MouseMove {
        x: f32,
        y: f32,
    },
    MouseUp {
        x: f32,
        y: f32,
    },
    /// The pointer left the surface while a button may still be held.
    MouseOut {
        x: f32,
        y: f32,
    },
    TouchStart {
        x: f32,
        y: f32,
    },
    TouchMove {
        x: f32,
        y: f32,
    },
    /// Touch lifted. Browsers report no position for the lifted finger.
    TouchEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    Start,
    Move,
    End { cancelled: bool },
}

/// One step of a gesture, in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    pub phase: GesturePhase,
    pub point: Point,
    pub modifiers: Modifiers,
}

impl GestureEvent {
    pub fn start(point: Point) -> Self {
        Self {
            phase: GesturePhase::Start,
            point,
            modifiers: Modifiers::default(),
        }
    }

    pub fn moved(point: Point) -> Self {
        Self {
            phase: GesturePhase::Move,
            point,
            modifiers: Modifiers::default(),
        }
    }

    pub fn end(point: Point) -> Self {
        Self {
            phase: GesturePhase::End { cancelled: false },
            point,
            modifiers: Modifiers::default(),
        }
    }

    pub fn cancel(point: Point) -> Self {
        Self {
            phase: GesturePhase::End { cancelled: true },
            point,
            modifiers: Modifiers::default(),
        }
    }
}

/// Translates host events into gesture events relative to the surface's
/// top-left corner on the page.
#[derive(Debug, Clone, Default)]
pub struct InputRouter {
    origin: Point,
    last_point: Option<Point>,
}

impl InputRouter {
    /// `origin` is the surface's offset on the page (offsetLeft, offsetTop).
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            last_point: None,
        }
    }

    fn local(&mut self, x: f32, y: f32) -> Point {
        let point = Point::new(x - self.origin.x, y - self.origin.y);
        self.last_point = Some(point);
        point
    }

    /// Map one host event. Returns `None` only for a `touch_end` that arrives
    /// before any position was ever seen.
    pub fn route(&mut self, event: &HostEvent) -> Option<GestureEvent> {
        let gesture = match *event {
            HostEvent::MouseDown { x, y, modifiers } => GestureEvent {
                phase: GesturePhase::Start,
                point: self.local(x, y),
                modifiers,
            },
            HostEvent::TouchStart { x, y } => GestureEvent::start(self.local(x, y)),
            HostEvent::MouseMove { x, y } | HostEvent::TouchMove { x, y } => {
                GestureEvent::moved(self.local(x, y))
            }
            HostEvent::MouseUp { x, y } => GestureEvent::end(self.local(x, y)),
            HostEvent::MouseOut { x, y } => GestureEvent::cancel(self.local(x, y)),
            HostEvent::TouchEnd => match self.last_point {
                Some(point) => GestureEvent::end(point),
                None => {
                    debug!("touch_end without a known position, ignoring");
                    return None;
                }
            },
        };
        trace!(?gesture, "routed host event");
        Some(gesture)
    }
}
