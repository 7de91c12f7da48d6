//! Error types in featsel
//!

use thiserror::Error;

use ndarray::ShapeError;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid feature subset {0}")]
    InvalidSubset(String),
    #[error("invalid fold count {0}: {1}")]
    InvalidFoldCount(usize, String),
    #[error("training failed in fold {fold}: {reason}")]
    TrainingFailure { fold: usize, reason: String },
    #[error("initial subset could not be evaluated: {0}")]
    InitializationFailure(Box<Error>),
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("invalid ndarray shape {0}")]
    Shape(#[from] ShapeError),
}

impl Error {
    /// Whether the failure belongs to a single evaluation and a search may continue past it
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::TrainingFailure { .. })
    }
}
