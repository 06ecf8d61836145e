// src/error.rs

use thiserror::Error;

/// Everything that can go wrong while building, carving, or moving a grid
/// around. The core operations only ever produce `InvalidArgument` and
/// `GenerationStalled`; the rest belong to config loading and export.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("generation stalled after {steps} steps (frontier column {frontier})")]
    GenerationStalled { steps: usize, frontier: usize },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("malformed grid data: {0}")]
    Decode(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, PathError>;
