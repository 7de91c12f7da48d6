//! `featsel` selects the subset of input features which best predicts a binary outcome.
//!
//! A subset is scored by k-fold cross-validation: a classifier is fitted on all folds but one,
//! restricted to the columns of the subset, and predicts the held-out fold. The number of
//! correctly predicted rows over all folds is the score of the subset.
//!
//! On top of this scoring primitive a randomized local search grows a required starting subset
//! one feature at a time, accepting a feature only if it strictly improves the score. Because
//! the order in which features are tried decides the local optimum, the search is restarted with
//! independent random orders and the best subset over all runs is kept.
//!
//! The classifier is a pluggable capability, see [`traits::Fit`] and [`traits::Predict`]. A
//! Gaussian Naive Bayes implementation lives in the `featsel-bayes` crate.
//!
//! ```rust,ignore
//! use featsel::prelude::*;
//! use featsel::cross_validation::KFoldEvaluator;
//! use featsel::search::OptimizationDriver;
//! use featsel_bayes::GaussianNb;
//!
//! let params = GaussianNb::params();
//! let evaluator = KFoldEvaluator::new(&dataset, &params, 4)?;
//!
//! let optimization = OptimizationDriver::params()
//!     .seed(42)
//!     .optimize(&evaluator, dataset.feature_names(), initial)?;
//!
//! println!("{} scores {}", optimization.best().subset(), optimization.best().score());
//! ```

pub mod cross_validation;
pub mod dataset;
pub mod error;
mod metrics_classification;
pub mod param_guard;
pub mod prelude;
pub mod search;
pub mod traits;

pub use dataset::{Dataset, FeatureSubset, Float};
pub use error::{Error, Result};
pub use param_guard::ParamGuard;

/// Common metrics functions for binary classification
pub mod metrics {
    pub use crate::metrics_classification::{ConfusionMatrix, Score, ToConfusionMatrix};
}
