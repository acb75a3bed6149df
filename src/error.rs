//! Error taxonomy
//!
//! Only true resource failures are errors. A tick with no tracked object or no
//! collision is normal control flow and never surfaces here.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load the color calibration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing color range file ({})", path.display())]
    Missing { path: PathBuf },
    #[error("malformed color range setting `{key}`: {reason}")]
    Malformed { key: &'static str, reason: String },
    #[error("failed to access color range file: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to pull a frame at the loop boundary (fatal)
#[derive(Debug, Error)]
pub enum FrameSourceError {
    #[error("no video source available: {reason}")]
    Unavailable { reason: String },
}

/// Failure to load the optional tuning file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Any fatal condition that stops the game
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    FrameSource(#[from] FrameSourceError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
