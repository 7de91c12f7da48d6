//! `featsel-datasets` provides the data the feature search runs on.
//!
//! ## Loading a dataset
//!
//! [`from_csv`] reads an already cleaned, numeric CSV file. The header row names the features,
//! one column holds the binary label encoded as `0` or `1`:
//! ```ignore
//! let dataset = featsel_datasets::from_csv("data/loans.csv", "IR_TF")?;
//! ```
//!
//! Cleaning raw data (dropping missing values, converting percentages or categorical columns)
//! is not part of this crate.
//!
//! ## Synthetic datasets
//!
//! With the `generate` feature enabled the [`generate`] module produces datasets with a known
//! structure, for tests, benchmarks and demos.

mod dataset;
#[cfg(feature = "generate")]
pub mod generate;

pub use dataset::{from_csv, from_reader};

use thiserror::Error;

/// Simplified `Result` using [`DatasetError`] as error type
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Error variants from loading a dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("csv error {0}")]
    Csv(#[from] csv::Error),
    #[error("cannot parse {value:?} in row {row}, column {column} as a number")]
    Parse {
        row: usize,
        column: String,
        value: String,
    },
    #[error("label column {0} does not exist")]
    MissingLabel(String),
    #[error("label {value:?} in row {row} is neither 0 nor 1")]
    InvalidLabel { row: usize, value: String },
    #[error(transparent)]
    Core(#[from] featsel::Error),
}
