//! Provide traits for the classifier capability
//!
//! A classifier is split into two pieces: a set of (hyper-)parameters implementing [`Fit`],
//! which estimates a model from a training partition, and the fitted model implementing
//! [`Predict`]. The cross-validation and search code only ever see these two traits, so any model
//! family can be plugged in without touching the search logic.

use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::dataset::{FeatureSubset, Float};
use crate::error::Result;
use crate::metrics_classification::Score;

/// Fittable algorithms
///
/// A fittable algorithm takes a training partition (records restricted to the evaluated feature
/// subset and the binary targets) and creates a model which implements [`Predict`]. Fitting
/// must be deterministic given identical training data.
pub trait Fit<F: Float> {
    type Object: Predict<F>;
    type Error: std::error::Error;

    fn fit(
        &self,
        records: ArrayView2<F>,
        targets: ArrayView1<bool>,
    ) -> std::result::Result<Self::Object, Self::Error>;
}

/// Predict binary labels with a fitted model
///
/// The returned array holds one label per row of `records`.
pub trait Predict<F: Float> {
    fn predict(&self, records: ArrayView2<F>) -> Array1<bool>;
}

/// Score feature subsets
///
/// This is the seam between the subset search and the evaluation of a single subset. The k-fold
/// evaluator is the implementation used in practice.
pub trait SubsetScorer {
    /// Check that every feature of the subset can be evaluated
    fn check_subset(&self, subset: &FeatureSubset) -> Result<()>;

    /// Score a single subset, higher is better
    fn score_subset(&self, subset: &FeatureSubset) -> Result<Score>;
}
