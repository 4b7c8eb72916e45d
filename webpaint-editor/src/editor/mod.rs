// Editor module for WebPaint.

pub mod canvas;
pub mod fill;
pub mod history;
pub mod script;
pub mod session;
pub mod tools;

pub use canvas::Canvas;
pub use fill::FloodFiller;
pub use history::{HistoryStack, HistoryStep, Snapshot};
pub use script::{run_script, ReplayScript, ReplaySummary, ScriptStep};
pub use session::{Editor, EditorError, HistoryAction};
pub use tools::{Gesture, GestureOutcome, ToolEngine};
