// error.rs - Errors raised by grid construction and cell access

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("alive probability must be within 0.0..=1.0, got {0}")]
    InvalidProbability(f64),

    #[error("unknown grid size {0:?}")]
    UnknownPreset(String),
}

pub type Result<T> = std::result::Result<T, GridError>;
