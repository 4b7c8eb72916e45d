//! Editor session.
//!
//! The session is the single owner of everything a page used to keep in
//! globals: canvas, history, the active tool, and the style panel values.
//! Hosts feed it gesture events and toolbar actions; nothing else mutates
//! the canvas.

use anyhow::Context;
use image::RgbaImage;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;
use webpaint_core::{PaintError, Point, StylePanel, Tool};
use webpaint_document::{
    decode_image, encode_png, save_png, scale_to_fill, ConfigError, DocumentError, EditorConfig,
};
use webpaint_input::{GestureEvent, GesturePhase};

use crate::editor::canvas::Canvas;
use crate::editor::history::{HistoryStack, HistoryStep};
use crate::editor::tools::{GestureOutcome, ToolEngine};

/// What an undo or redo did to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    /// A stored snapshot was put back.
    Restored,
    /// Walked past the oldest snapshot; the canvas is background only.
    Blanked,
    /// Nothing to redo.
    Unchanged,
}

pub struct Editor {
    session_id: Uuid,
    config: EditorConfig,
    canvas: Canvas,
    history: HistoryStack,
    engine: ToolEngine,
    tool: Tool,
    style_panel: StylePanel,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Result<Self, EditorError> {
        config.validate()?;

        let session_id = Uuid::new_v4();
        info!(
            session = %session_id,
            width = config.width,
            height = config.height,
            "starting editor session"
        );

        let canvas = Canvas::new(config.width, config.height, config.background)?;
        Ok(Self {
            session_id,
            canvas,
            history: HistoryStack::new(config.history_capacity),
            engine: ToolEngine::from_config(&config),
            tool: Tool::default(),
            style_panel: config.default_style.into(),
            config,
        })
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn is_drawing(&self) -> bool {
        self.engine.is_active()
    }

    /// Takes effect at the next gesture start.
    pub fn select_tool(&mut self, tool: Tool) {
        debug!(session = %self.session_id, tool = tool.name(), "tool selected");
        self.tool = tool;
    }

    pub fn style_panel(&self) -> &StylePanel {
        &self.style_panel
    }

    /// Panel values are read at gesture start and validated there.
    pub fn style_panel_mut(&mut self) -> &mut StylePanel {
        &mut self.style_panel
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.style_panel.color = color.into();
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        self.style_panel.stroke_width = width;
    }

    pub fn set_fill_mode(&mut self, fill_mode: bool) {
        self.style_panel.fill_mode = fill_mode;
    }

    /// Dispatch one routed gesture event.
    pub fn handle(&mut self, event: &GestureEvent) -> Result<Option<GestureOutcome>, EditorError> {
        match event.phase {
            GesturePhase::Start => {
                self.gesture_start(event.point)?;
                Ok(None)
            }
            GesturePhase::Move => {
                self.gesture_move(event.point);
                Ok(None)
            }
            GesturePhase::End { cancelled } => Ok(Some(self.gesture_end(event.point, cancelled))),
        }
    }

    /// Lock in the current style and tool and begin a gesture. An invalid
    /// style panel skips the gesture entirely and drops any gesture still
    /// in progress.
    pub fn gesture_start(&mut self, point: Point) -> Result<(), EditorError> {
        let style = match self.style_panel.to_style() {
            Ok(style) => style,
            Err(err) => {
                warn!(session = %self.session_id, error = %err, "gesture skipped");
                self.engine.abort(&mut self.canvas);
                return Err(err.into());
            }
        };
        self.engine.start(&mut self.canvas, point, style, self.tool);
        Ok(())
    }

    pub fn gesture_move(&mut self, point: Point) {
        self.engine.move_to(&mut self.canvas, point);
    }

    /// Finish the gesture; a commit is recorded in history.
    pub fn gesture_end(&mut self, point: Point, cancelled: bool) -> GestureOutcome {
        let outcome = self.engine.end(&mut self.canvas, point, cancelled);
        if outcome == GestureOutcome::Committed {
            self.history.push_snapshot(self.canvas.snapshot());
        }
        outcome
    }

    pub fn undo(&mut self) -> HistoryAction {
        self.engine.abort(&mut self.canvas);
        let action = match self.history.undo() {
            HistoryStep::Snapshot(snapshot) => {
                self.canvas.restore(snapshot);
                HistoryAction::Restored
            }
            HistoryStep::Blank => {
                self.canvas.clear();
                HistoryAction::Blanked
            }
            HistoryStep::NoOp => HistoryAction::Unchanged,
        };
        debug!(session = %self.session_id, ?action, cursor = ?self.history.cursor(), "undo");
        action
    }

    pub fn redo(&mut self) -> HistoryAction {
        self.engine.abort(&mut self.canvas);
        let action = match self.history.redo() {
            HistoryStep::Snapshot(snapshot) => {
                self.canvas.restore(snapshot);
                HistoryAction::Restored
            }
            HistoryStep::Blank => {
                self.canvas.clear();
                HistoryAction::Blanked
            }
            HistoryStep::NoOp => HistoryAction::Unchanged,
        };
        debug!(session = %self.session_id, ?action, cursor = ?self.history.cursor(), "redo");
        action
    }

    /// Paint the background over everything and forget all history.
    pub fn clear(&mut self) {
        info!(session = %self.session_id, "clearing canvas and history");
        self.engine.abort(&mut self.canvas);
        self.canvas.clear();
        self.history.clear();
    }

    /// Resize both surfaces. Stored snapshots no longer match, so history is
    /// dropped.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), EditorError> {
        self.engine.abort(&mut self.canvas);
        self.canvas.resize(width, height)?;
        self.history.clear();
        info!(session = %self.session_id, width, height, "canvas resized");
        Ok(())
    }

    /// Committed surface as PNG bytes.
    pub fn export_png(&self) -> Result<Vec<u8>, EditorError> {
        Ok(encode_png(self.canvas.surface())?)
    }

    /// Write the PNG into `dir` under the configured export filename.
    pub fn save_png(&self, dir: impl AsRef<Path>) -> anyhow::Result<PathBuf> {
        let png = self.export_png().context("export canvas")?;
        save_png(dir, &self.config.export_filename, &png)
    }

    /// Replace the canvas with a decoded image stretched to the current size.
    /// On a decode failure the canvas and history are left untouched.
    pub fn import_image(&mut self, bytes: &[u8]) -> Result<(), EditorError> {
        let decoded = decode_image(bytes)?;
        self.clear();

        let scaled = scale_to_fill(&decoded, self.canvas.width(), self.canvas.height());
        self.canvas.surface_mut().composite(&scaled, 0, 0);
        info!(
            session = %self.session_id,
            source_width = decoded.width(),
            source_height = decoded.height(),
            "image imported"
        );
        Ok(())
    }

    pub fn load_image(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let bytes = fs::read(path).with_context(|| format!("read image: {}", path.display()))?;
        self.import_image(&bytes)
            .with_context(|| format!("import image: {}", path.display()))?;
        Ok(())
    }

    /// Committed surface with any in-progress preview drawn on top.
    pub fn composited(&self) -> RgbaImage {
        self.canvas.composited()
    }
}

/// Errors surfaced by editor operations.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    Paint(#[from] PaintError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
