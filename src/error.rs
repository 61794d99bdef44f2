use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a run, in the order it can occur:
/// validation errors fire before any subprocess is spawned, engine and
/// overlay errors after partial work exists on disk.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported input file type: {0}")]
    UnsupportedInput(String),

    #[error("unknown effect: {0}")]
    UnknownEffect(String),

    #[error("effect '{effect}' does not support {media} input")]
    TypeMismatch {
        effect: &'static str,
        media: &'static str,
    },

    #[error("effect '{effect}': invalid parameter '{value}'")]
    BadParameter {
        effect: &'static str,
        value: String,
    },

    #[error("probe failed: {0}")]
    ProbeFailed(String),

    #[error("engine failed: {0}")]
    EngineFailed(String),

    #[error("overlay pass failed: {0}")]
    OverlayFailed(String),

    #[error("sound sample not found: {0}")]
    SampleNotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
