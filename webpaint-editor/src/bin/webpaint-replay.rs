use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use webpaint_document::{load_config, EditorConfig};
use webpaint_editor::{run_script, Editor, ReplayScript};

/// Replay recorded pointer events and toolbar actions against a headless
/// canvas, then save the result as PNG.
#[derive(Parser, Debug)]
#[command(name = "webpaint-replay", version, about)]
struct Args {
    /// JSON replay script.
    #[arg(long)]
    script: PathBuf,

    /// Directory the PNG is written to.
    #[arg(long, default_value = "out")]
    output: PathBuf,

    /// Optional JSON editor config; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => EditorConfig::default(),
    };
    let mut editor = Editor::new(config).context("create editor")?;

    let script = ReplayScript::load(&args.script)?;
    let base_dir = args.script.parent().unwrap_or(Path::new("."));
    let summary = run_script(&mut editor, &script, base_dir, &args.output)?;

    let path = editor.save_png(&args.output)?;
    println!(
        "{} commits, {} cancelled, {} skipped -> {}",
        summary.committed,
        summary.cancelled,
        summary.skipped,
        path.display()
    );
    Ok(())
}
