// Replay scripts: a recorded stream of host events and toolbar actions that
// can drive an editor without a browser attached.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use webpaint_core::{Point, Tool};
use webpaint_input::{HostEvent, InputRouter};

use crate::editor::session::Editor;
use crate::editor::tools::GestureOutcome;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    Event { event: HostEvent },
    SelectTool { tool: Tool },
    SetColor { color: String },
    SetStrokeWidth { width: f32 },
    SetFillMode { fill: bool },
    Undo,
    Redo,
    Clear,
    Resize { width: u32, height: u32 },
    /// Relative paths resolve against the script's directory.
    Load { path: PathBuf },
    /// Write the current canvas into the output directory.
    Save,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Surface offset on the recorded page; subtracted from event positions.
    #[serde(default)]
    pub origin: Point,
    pub steps: Vec<ScriptStep>,
}

impl ReplayScript {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("read replay script: {}", path.display()))?;
        serde_json::from_str(&data).context("parse replay script json")
    }
}

/// Counters for what a replay did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub committed: usize,
    pub cancelled: usize,
    /// Gestures or imports that were rejected and left the canvas as it was.
    pub skipped: usize,
    pub saved: Vec<PathBuf>,
}

/// Apply every step of `script` to `editor`. Rejected gestures and failed
/// image loads are logged and skipped; only save failures abort the replay.
pub fn run_script(
    editor: &mut Editor,
    script: &ReplayScript,
    base_dir: &Path,
    output_dir: &Path,
) -> anyhow::Result<ReplaySummary> {
    let mut router = InputRouter::new(script.origin);
    let mut summary = ReplaySummary::default();
    info!(steps = script.steps.len(), "replaying script");

    for (index, step) in script.steps.iter().enumerate() {
        debug!(index, ?step, "replay step");
        match step {
            ScriptStep::Event { event } => {
                let Some(gesture) = router.route(event) else {
                    continue;
                };
                match editor.handle(&gesture) {
                    Ok(Some(GestureOutcome::Committed)) => summary.committed += 1,
                    Ok(Some(GestureOutcome::Cancelled)) => summary.cancelled += 1,
                    Ok(_) => {}
                    Err(err) => {
                        warn!(index, error = %err, "gesture rejected");
                        summary.skipped += 1;
                    }
                }
            }
            ScriptStep::SelectTool { tool } => editor.select_tool(*tool),
            ScriptStep::SetColor { color } => editor.set_color(color.clone()),
            ScriptStep::SetStrokeWidth { width } => editor.set_stroke_width(*width),
            ScriptStep::SetFillMode { fill } => editor.set_fill_mode(*fill),
            ScriptStep::Undo => {
                editor.undo();
            }
            ScriptStep::Redo => {
                editor.redo();
            }
            ScriptStep::Clear => editor.clear(),
            ScriptStep::Resize { width, height } => {
                if let Err(err) = editor.resize(*width, *height) {
                    warn!(index, error = %err, "resize rejected");
                    summary.skipped += 1;
                }
            }
            ScriptStep::Load { path } => {
                let path = base_dir.join(path);
                if let Err(err) = editor.load_image(&path) {
                    error!(index, error = %format!("{err:#}"), "image load failed");
                    summary.skipped += 1;
                }
            }
            ScriptStep::Save => {
                let saved = editor.save_png(output_dir)?;
                summary.saved.push(saved);
            }
        }
    }

    info!(
        committed = summary.committed,
        cancelled = summary.cancelled,
        skipped = summary.skipped,
        "replay finished"
    );
    Ok(summary)
}
