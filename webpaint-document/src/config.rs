//! Editor configuration.
//!
//! Everything a page would otherwise hard-code (canvas background, history depth,
//! highlighter transparency, download filename) lives here so a host can
//! override it from a JSON file. Missing fields fall back to those defaults.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use webpaint_core::{Color, Style};

use crate::export::DEFAULT_EXPORT_FILENAME;

/// Default number of snapshots the history keeps.
pub const DEFAULT_HISTORY_CAPACITY: usize = 15;

/// Highlighter alpha on the 0..=255 scale. One step above invisible, so a
/// single pass barely shows and overlapping passes build up.
pub const DEFAULT_HIGHLIGHTER_ALPHA: u8 = 1;

/// Which flood fill the Fill tool runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStrategy {
    /// 4-connected per-pixel fill. Never leaves the origin's region.
    #[default]
    PixelExact,
    /// Paints 4x4 blocks stepping 4 pixels at a time. Fast, but leaves up to
    /// 3px fringes and can bleed through thin boundaries.
    Block4,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub history_capacity: usize,
    pub highlighter_alpha: u8,
    pub fill_strategy: FillStrategy,
    pub export_filename: String,
    /// Style panel values a fresh editor starts with.
    pub default_style: Style,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Color::WHITE,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            highlighter_alpha: DEFAULT_HIGHLIGHTER_ALPHA,
            fill_strategy: FillStrategy::PixelExact,
            export_filename: DEFAULT_EXPORT_FILENAME.to_string(),
            default_style: Style::default(),
        }
    }
}

impl EditorConfig {
    /// Check every field. Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            tracing::error!(
                width = self.width,
                height = self.height,
                "canvas dimensions must be positive"
            );
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        if self.history_capacity == 0 {
            tracing::error!("history_capacity cannot be zero");
            return Err(ConfigError::InvalidHistoryCapacity);
        }

        let width = self.default_style.stroke_width;
        if !width.is_finite() || width <= 0.0 {
            tracing::error!(width, "default stroke width must be positive");
            return Err(ConfigError::InvalidStrokeWidth { value: width });
        }

        if self.highlighter_alpha == 0 {
            tracing::warn!("highlighter_alpha of zero makes highlighter strokes invisible");
        }

        let invalid_chars = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
        if self.export_filename.trim().is_empty() {
            tracing::error!("export filename is empty");
            return Err(ConfigError::InvalidExportFilename {
                reason: "filename is empty".into(),
            });
        }
        for ch in invalid_chars {
            if self.export_filename.contains(ch) {
                tracing::error!(
                    filename = %self.export_filename,
                    invalid_char = %ch,
                    "export filename contains invalid character"
                );
                return Err(ConfigError::InvalidExportFilename {
                    reason: format!("contains invalid character '{}'", ch),
                });
            }
        }

        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("canvas dimensions must be positive: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("history capacity must be at least 1")]
    InvalidHistoryCapacity,

    #[error("default stroke width must be positive, got {value}")]
    InvalidStrokeWidth { value: f32 },

    #[error("invalid export filename: {reason}")]
    InvalidExportFilename { reason: String },
}

/// Save a config to disk as pretty JSON.
pub fn save_config(path: impl AsRef<Path>, config: &EditorConfig) -> anyhow::Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create parent dir: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(config).context("serialize config to json")?;
    fs::write(path, json).with_context(|| format!("write config file: {}", path.display()))?;
    Ok(())
}

/// Load and validate a config from disk.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<EditorConfig> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config file: {}", path.display()))?;
    let config: EditorConfig = serde_json::from_str(&data).context("parse config json")?;
    config
        .validate()
        .with_context(|| format!("validate config file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}
