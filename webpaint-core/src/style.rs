//! Tool selection and per-gesture drawing style.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Color, PaintError};

/// The drawing tools a gesture can run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    Brush,
    Highlighter,
    Eraser,
    Line,
    #[serde(alias = "square")]
    Rectangle,
    #[serde(alias = "circle")]
    Ellipse,
    Fill,
}

/// How a tool's pixels reach the committed surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// Paints onto the committed surface on every move.
    Continuous,
    /// Renders to the preview overlay while moving, commits once on release.
    Preview,
    /// Does all of its work on gesture start.
    Instant,
}

impl Tool {
    pub fn kind(&self) -> ToolKind {
        match self {
            Tool::Brush | Tool::Highlighter | Tool::Eraser => ToolKind::Continuous,
            Tool::Line | Tool::Rectangle | Tool::Ellipse => ToolKind::Preview,
            Tool::Fill => ToolKind::Instant,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Brush => "Brush",
            Tool::Highlighter => "Highlighter",
            Tool::Eraser => "Eraser",
            Tool::Line => "Line",
            Tool::Rectangle => "Rectangle",
            Tool::Ellipse => "Ellipse",
            Tool::Fill => "Fill",
        }
    }
}

/// Validated style, locked in for the duration of one gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub color: Color,
    pub stroke_width: f32,
    /// `false` strokes closed shapes, `true` fills their interior.
    pub fill_mode: bool,
}

impl Style {
    pub fn new(color: Color, stroke_width: f32, fill_mode: bool) -> Result<Self, PaintError> {
        if !stroke_width.is_finite() || stroke_width <= 0.0 {
            return Err(PaintError::InvalidStrokeWidth {
                value: stroke_width,
            });
        }
        Ok(Self {
            color,
            stroke_width,
            fill_mode,
        })
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            stroke_width: 20.0,
            fill_mode: false,
        }
    }
}

/// Raw values as the style-control panel reports them. Nothing here is
/// trusted until a gesture starts and [`StylePanel::to_style`] validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StylePanel {
    pub color: String,
    pub stroke_width: f32,
    pub fill_mode: bool,
}

impl StylePanel {
    pub fn to_style(&self) -> Result<Style, PaintError> {
        let color = Color::parse(&self.color)?;
        let style = Style::new(color, self.stroke_width, self.fill_mode)?;
        debug!(color = %style.color, width = style.stroke_width, fill = style.fill_mode, "style captured");
        Ok(style)
    }
}

impl From<Style> for StylePanel {
    fn from(style: Style) -> Self {
        Self {
            color: style.color.to_string(),
            stroke_width: style.stroke_width,
            fill_mode: style.fill_mode,
        }
    }
}

impl Default for StylePanel {
    fn default() -> Self {
        Style::default().into()
    }
}
