// Drawing tools for the canvas editor.
//
// The engine keeps at most one gesture alive. Style and tool are copied into
// the gesture when it starts, so panel changes mid-drag never leak into it.

use tracing::{debug, trace};
use webpaint_core::raster;
use webpaint_core::{Color, Point, Style, Surface, Tool, ToolKind};
use webpaint_document::{EditorConfig, FillStrategy};

use crate::editor::canvas::Canvas;
use crate::editor::fill::FloodFiller;

/// One pointer-down to pointer-up interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub anchor: Point,
    pub current: Point,
    pub tool: Tool,
    pub style: Style,
}

impl Gesture {
    /// Bounding-box extent from the anchor, signed.
    fn extent(&self) -> (f32, f32) {
        (
            self.current.x - self.anchor.x,
            self.current.y - self.anchor.y,
        )
    }
}

/// How a gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// The gesture's pixels are now part of the committed surface.
    Committed,
    /// Pointer left the surface; nothing was committed.
    Cancelled,
    /// There was no gesture to end.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct ToolEngine {
    gesture: Option<Gesture>,
    // Pixels the active continuous stroke has already painted, row-major.
    coverage: Vec<bool>,
    highlighter_alpha: u8,
    filler: FloodFiller,
}

impl ToolEngine {
    pub fn new(highlighter_alpha: u8, fill_strategy: FillStrategy) -> Self {
        Self {
            gesture: None,
            coverage: Vec::new(),
            highlighter_alpha,
            filler: FloodFiller::new(fill_strategy),
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.highlighter_alpha, config.fill_strategy)
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn start(&mut self, canvas: &mut Canvas, point: Point, style: Style, tool: Tool) {
        if self.gesture.is_some() {
            debug!("Gesture started while another was active, dropping the old one");
        }
        debug!(
            "Starting {} gesture at ({}, {}) width {} color {}",
            tool.name(),
            point.x,
            point.y,
            style.stroke_width,
            style.color
        );

        let gesture = Gesture {
            anchor: point,
            current: point,
            tool,
            style,
        };

        canvas.preview_mut().clear();
        self.coverage.clear();
        match tool.kind() {
            // A press without movement still leaves a round dot.
            ToolKind::Continuous => self.stroke(canvas, &gesture, point, point),
            ToolKind::Preview => render_shape(canvas.preview_mut(), &gesture, false),
            ToolKind::Instant => {
                self.filler.fill(canvas.surface_mut(), point, style.color);
            }
        }

        self.gesture = Some(gesture);
    }

    pub fn move_to(&mut self, canvas: &mut Canvas, point: Point) {
        canvas.preview_mut().clear();

        let Some(mut gesture) = self.gesture else {
            return;
        };
        let previous = gesture.current;
        gesture.current = point;

        match gesture.tool.kind() {
            ToolKind::Continuous => self.stroke(canvas, &gesture, previous, point),
            ToolKind::Preview => render_shape(canvas.preview_mut(), &gesture, false),
            ToolKind::Instant => {}
        }

        self.gesture = Some(gesture);
    }

    /// Finish the active gesture. A release at a new position counts as one
    /// last move first; a cancellation leaves everything where it was.
    pub fn end(&mut self, canvas: &mut Canvas, point: Point, cancelled: bool) -> GestureOutcome {
        if !cancelled && self.gesture.is_some_and(|g| g.current != point) {
            self.move_to(canvas, point);
        }
        canvas.preview_mut().clear();

        let Some(gesture) = self.gesture.take() else {
            trace!("Gesture end with no active gesture");
            return GestureOutcome::Ignored;
        };

        if cancelled {
            debug!("{} gesture cancelled", gesture.tool.name());
            return GestureOutcome::Cancelled;
        }

        if gesture.tool.kind() == ToolKind::Preview {
            render_shape(canvas.surface_mut(), &gesture, true);
        }
        debug!("{} gesture committed", gesture.tool.name());
        GestureOutcome::Committed
    }

    /// Drop the active gesture without committing.
    pub fn abort(&mut self, canvas: &mut Canvas) {
        if self.gesture.take().is_some() {
            debug!("Aborting active gesture");
        }
        canvas.preview_mut().clear();
    }

    /// Paint one segment of a continuous stroke. Joints between segments
    /// overlap, so pixels this gesture already touched are skipped and a
    /// translucent stroke blends once per pixel.
    fn stroke(&mut self, canvas: &mut Canvas, gesture: &Gesture, from: Point, to: Point) {
        let color = self.stroke_color(gesture, canvas.background());
        let surface = canvas.surface_mut();
        let (w, h) = surface.bounds();
        let len = w as usize * h as usize;
        if self.coverage.len() != len {
            self.coverage = vec![false; len];
        }

        trace!(?from, ?to, width = gesture.style.stroke_width, %color, "stroke segment");
        let coverage = &mut self.coverage;
        raster::capsule(from, to, gesture.style.stroke_width, (w, h), |x, y| {
            let i = y as usize * w as usize + x as usize;
            if !coverage[i] {
                coverage[i] = true;
                surface.blend_pixel(x, y, color);
            }
        });
    }

    fn stroke_color(&self, gesture: &Gesture, background: Color) -> Color {
        match gesture.tool {
            Tool::Eraser => background,
            Tool::Highlighter => gesture.style.color.with_alpha(self.highlighter_alpha),
            _ => gesture.style.color,
        }
    }
}

impl Default for ToolEngine {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

/// Draw a preview tool's shape. The overlay always shows outlines; the
/// committed shape honors the style's fill mode (lines are always stroked).
fn render_shape<S: Surface + ?Sized>(surface: &mut S, gesture: &Gesture, commit: bool) {
    let style = gesture.style;
    let filled = commit && style.fill_mode;
    let (w, h) = gesture.extent();

    match gesture.tool {
        Tool::Line => {
            surface.draw_line(gesture.anchor, gesture.current, style.stroke_width, style.color)
        }
        Tool::Rectangle if filled => surface.fill_rect(gesture.anchor, gesture.current, style.color),
        Tool::Rectangle => {
            surface.stroke_rect(gesture.anchor, gesture.current, style.stroke_width, style.color)
        }
        Tool::Ellipse => {
            let center = Point::new(gesture.anchor.x + w / 2.0, gesture.anchor.y + h / 2.0);
            let (rx, ry) = ((w / 2.0).abs(), (h / 2.0).abs());
            if filled {
                surface.fill_ellipse(center, rx, ry, style.color);
            } else {
                surface.stroke_ellipse(center, rx, ry, style.stroke_width, style.color);
            }
        }
        other => trace!("{} has no shape to render", other.name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(width: f32, fill_mode: bool) -> Style {
        Style::new(Color::BLACK, width, fill_mode).unwrap()
    }

    fn canvas() -> Canvas {
        Canvas::new(64, 64, Color::WHITE).unwrap()
    }

    #[test]
    fn test_brush_paints_live() {
        let mut canvas = canvas();
        let mut engine = ToolEngine::default();

        engine.start(&mut canvas, Point::new(10.0, 10.0), style(3.0, false), Tool::Brush);
        engine.move_to(&mut canvas, Point::new(40.0, 10.0));
        assert_eq!(canvas.surface().pixel(25, 10), Some(Color::BLACK));
        assert!(canvas.preview().is_blank());

        assert_eq!(
            engine.end(&mut canvas, Point::new(40.0, 10.0), false),
            GestureOutcome::Committed
        );
        assert!(!engine.is_active());
    }

    #[test]
    fn test_zero_length_brush_leaves_dot() {
        let mut canvas = canvas();
        let mut engine = ToolEngine::default();
        engine.start(&mut canvas, Point::new(10.0, 10.0), style(5.0, false), Tool::Brush);
        engine.end(&mut canvas, Point::new(10.0, 10.0), false);
        assert_eq!(canvas.surface().pixel(10, 10), Some(Color::BLACK));
        assert_eq!(canvas.surface().pixel(20, 20), Some(Color::WHITE));
    }

    #[test]
    fn test_eraser_uses_background() {
        let mut canvas = Canvas::new(32, 32, Color::rgb(1, 2, 3)).unwrap();
        canvas.surface_mut().fill(Color::BLACK);
        let mut engine = ToolEngine::default();
        let red = Style::new(Color::rgb(255, 0, 0), 4.0, false).unwrap();

        engine.start(&mut canvas, Point::new(5.0, 5.0), red, Tool::Eraser);
        engine.move_to(&mut canvas, Point::new(20.0, 5.0));
        engine.end(&mut canvas, Point::new(20.0, 5.0), false);

        assert_eq!(canvas.surface().pixel(12, 5), Some(Color::rgb(1, 2, 3)));
    }

    #[test]
    fn test_highlighter_is_nearly_transparent() {
        let mut canvas = canvas();
        let mut engine = ToolEngine::default();
        engine.start(&mut canvas, Point::new(10.0, 10.0), style(4.0, false), Tool::Highlighter);
        engine.end(&mut canvas, Point::new(10.0, 10.0), false);

        let once = canvas.surface().pixel(10, 10).unwrap();
        assert_eq!(once, Color::rgb(254, 254, 254));

        engine.start(&mut canvas, Point::new(10.0, 10.0), style(4.0, false), Tool::Highlighter);
        engine.end(&mut canvas, Point::new(10.0, 10.0), false);
        let twice = canvas.surface().pixel(10, 10).unwrap();
        assert!(twice.r < once.r);
    }

    #[test]
    fn test_highlighter_ignores_color_alpha() {
        let mut canvas = canvas();
        let mut engine = ToolEngine::new(64, FillStrategy::PixelExact);
        let translucent = Style::new(Color::rgba(0, 0, 0, 200), 4.0, false).unwrap();
        engine.start(&mut canvas, Point::new(10.0, 10.0), translucent, Tool::Highlighter);
        let px = canvas.surface().pixel(10, 10).unwrap();
        assert_eq!(px, Color::BLACK.with_alpha(64).over(Color::WHITE));
    }

    #[test]
    fn test_highlighter_stroke_blends_once_across_joints() {
        let mut canvas = canvas();
        let mut engine = ToolEngine::new(77, FillStrategy::PixelExact);
        engine.start(&mut canvas, Point::new(5.0, 30.0), style(6.0, false), Tool::Highlighter);
        for x in [15.0, 25.0, 35.0, 45.0] {
            engine.move_to(&mut canvas, Point::new(x, 30.0));
        }
        engine.end(&mut canvas, Point::new(45.0, 30.0), false);

        let expected = Color::BLACK.with_alpha(77).over(Color::WHITE);
        for x in 2..48 {
            assert_eq!(canvas.surface().pixel(x, 30), Some(expected), "x = {x}");
        }
    }

    #[test]
    fn test_next_highlighter_stroke_builds_up() {
        let mut canvas = canvas();
        let mut engine = ToolEngine::new(77, FillStrategy::PixelExact);
        for _ in 0..2 {
            engine.start(&mut canvas, Point::new(5.0, 30.0), style(6.0, false), Tool::Highlighter);
            engine.move_to(&mut canvas, Point::new(20.0, 30.0));
            engine.end(&mut canvas, Point::new(20.0, 30.0), false);
        }
        let once = Color::BLACK.with_alpha(77).over(Color::WHITE);
        let twice = Color::BLACK.with_alpha(77).over(once);
        assert_eq!(canvas.surface().pixel(12, 30), Some(twice));
    }

    #[test]
    fn test_stroked_ellipse_commits_outline() {
        let mut canvas = canvas();
        let mut engine = ToolEngine::default();
        engine.start(&mut canvas, Point::new(10.0, 10.0), style(2.0, false), Tool::Ellipse);
        engine.move_to(&mut canvas, Point::new(50.0, 40.0));
        assert_eq!(canvas.surface().pixel(10, 25), Some(Color::WHITE));

        assert_eq!(
            engine.end(&mut canvas, Point::new(50.0, 40.0), false),
            GestureOutcome::Committed
        );
        assert_eq!(canvas.surface().pixel(10, 25), Some(Color::BLACK));
        assert_eq!(canvas.surface().pixel(30, 10), Some(Color::BLACK));
        assert_eq!(canvas.surface().pixel(30, 25), Some(Color::WHITE));
    }

    #[test]
    fn test_degenerate_ellipse_commits_nothing_visible() {
        let mut canvas = canvas();
        let mut engine = ToolEngine::default();
        engine.start(&mut canvas, Point::new(9.0, 9.0), style(4.0, true), Tool::Ellipse);
        assert_eq!(
            engine.end(&mut canvas, Point::new(9.0, 9.0), false),
            GestureOutcome::Committed
        );
        assert!(canvas.surface().as_raw().iter().all(|&b| b == 255));
    }

    #[test]
    fn test_rectangle_previews_then_commits_outline() {
        let mut canvas = canvas();
        let mut engine = ToolEngine::default();
        engine.start(&mut canvas, Point::new(5.0, 5.0), style(2.0, false), Tool::Rectangle);
        engine.move_to(&mut canvas, Point::new(20.0, 20.0));

        assert!(!canvas.preview().is_blank());
        assert_eq!(canvas.surface().pixel(5, 12), Some(Color::WHITE));

        engine.end(&mut canvas, Point::new(20.0, 20.0), false);
        assert!(canvas.preview().is_blank());
        assert_eq!(canvas.surface().pixel(5, 12), Some(Color::BLACK));
        assert_eq!(canvas.surface().pixel(12, 12), Some(Color::WHITE));
    }

    #[test]
    fn test_filled_ellipse_commit() {
        let mut canvas = canvas();
        let mut engine = ToolEngine::default();
        engine.start(&mut canvas, Point::new(40.0, 40.0), style(1.0, true), Tool::Ellipse);
        engine.move_to(&mut canvas, Point::new(10.0, 20.0));

        // the preview is only an outline
        let center = canvas.preview().pixel(25, 30);
        assert_eq!(center, Some(Color::TRANSPARENT));

        engine.end(&mut canvas, Point::new(10.0, 20.0), false);
        assert_eq!(canvas.surface().pixel(25, 30), Some(Color::BLACK));
        assert_eq!(canvas.surface().pixel(2, 2), Some(Color::WHITE));
    }

    #[test]
    fn test_line_is_always_stroked() {
        let mut canvas = canvas();
        let mut engine = ToolEngine::default();
        engine.start(&mut canvas, Point::new(0.0, 32.0), style(2.0, true), Tool::Line);
        engine.end(&mut canvas, Point::new(63.0, 32.0), false);
        assert_eq!(canvas.surface().pixel(30, 32), Some(Color::BLACK));
        assert_eq!(canvas.surface().pixel(30, 40), Some(Color::WHITE));
    }

    #[test]
    fn test_cancel_discards_preview_shape() {
        let mut canvas = canvas();
        let mut engine = ToolEngine::default();
        engine.start(&mut canvas, Point::new(5.0, 5.0), style(2.0, false), Tool::Line);
        engine.move_to(&mut canvas, Point::new(30.0, 30.0));
        assert_eq!(
            engine.end(&mut canvas, Point::new(60.0, 60.0), true),
            GestureOutcome::Cancelled
        );
        assert!(canvas.preview().is_blank());
        assert!(canvas.surface().as_raw().iter().all(|&b| b == 255));
    }

    #[test]
    fn test_cancel_keeps_partial_brush_stroke() {
        let mut canvas = canvas();
        let mut engine = ToolEngine::default();
        engine.start(&mut canvas, Point::new(5.0, 5.0), style(2.0, false), Tool::Brush);
        engine.move_to(&mut canvas, Point::new(30.0, 5.0));
        engine.end(&mut canvas, Point::new(63.0, 5.0), true);
        assert_eq!(canvas.surface().pixel(20, 5), Some(Color::BLACK));
        // the cancel position is not drawn to
        assert_eq!(canvas.surface().pixel(50, 5), Some(Color::WHITE));
    }

    #[test]
    fn test_style_locked_for_gesture() {
        let mut canvas = canvas();
        let mut engine = ToolEngine::default();
        engine.start(&mut canvas, Point::new(5.0, 5.0), style(2.0, false), Tool::Rectangle);
        assert_eq!(engine.gesture().unwrap().tool, Tool::Rectangle);
        assert_eq!(engine.gesture().unwrap().style.stroke_width, 2.0);
    }

    #[test]
    fn test_fill_runs_on_start_and_ignores_moves() {
        let mut canvas = canvas();
        let mut engine = ToolEngine::default();
        let red = Style::new(Color::rgb(255, 0, 0), 1.0, false).unwrap();
        engine.start(&mut canvas, Point::new(3.0, 3.0), red, Tool::Fill);
        assert_eq!(canvas.surface().pixel(63, 63), Some(Color::rgb(255, 0, 0)));

        engine.move_to(&mut canvas, Point::new(10.0, 10.0));
        assert!(canvas.preview().is_blank());
        assert_eq!(
            engine.end(&mut canvas, Point::new(10.0, 10.0), false),
            GestureOutcome::Committed
        );
    }

    #[test]
    fn test_end_without_gesture_is_ignored() {
        let mut canvas = canvas();
        let mut engine = ToolEngine::default();
        engine.move_to(&mut canvas, Point::new(3.0, 3.0));
        assert_eq!(
            engine.end(&mut canvas, Point::new(3.0, 3.0), false),
            GestureOutcome::Ignored
        );
        assert!(canvas.surface().as_raw().iter().all(|&b| b == 255));
    }

    #[test]
    fn test_degenerate_rectangle_paints_nothing() {
        let mut canvas = canvas();
        let mut engine = ToolEngine::default();
        engine.start(&mut canvas, Point::new(9.0, 9.0), style(4.0, false), Tool::Rectangle);
        assert_eq!(
            engine.end(&mut canvas, Point::new(9.0, 9.0), false),
            GestureOutcome::Committed
        );
        assert!(canvas.surface().as_raw().iter().all(|&b| b == 255));
    }
}
