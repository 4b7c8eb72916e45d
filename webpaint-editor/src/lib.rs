//! webpaint-editor: the WebPaint drawing engine.
//!
//! Gesture events from `webpaint-input` drive an [`Editor`] session, which
//! paints through the tool engine onto the canvas surfaces from
//! `webpaint-core` and records every commit in a bounded snapshot history.

pub mod editor;

pub use editor::{
    run_script, Canvas, Editor, EditorError, FloodFiller, Gesture, GestureOutcome, HistoryAction,
    HistoryStack, HistoryStep, ReplayScript, ReplaySummary, ScriptStep, Snapshot, ToolEngine,
};
