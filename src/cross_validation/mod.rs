//! K-fold cross-validation
//!
//! The rows of a dataset are split into `k` contiguous folds. Each fold is predicted once by a
//! classifier fitted on all other folds, and the number of correct out-of-fold predictions is
//! the [`Score`](crate::metrics::Score) of the evaluated feature subset.
//!
//! The folds follow the row order of the dataset and are never shuffled implicitly. Call
//! [`Dataset::shuffle`](crate::Dataset::shuffle) beforehand if the rows are sorted.

mod evaluator;
mod folds;

pub use evaluator::{CrossValidation, KFoldEvaluator};
pub use folds::{Fold, FoldPartition};
