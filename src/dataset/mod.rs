//! Datasets
//!
//! This module implements the labelled dataset the evaluation runs on, together with the feature
//! subsets that select columns from it.
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, ErrorKind, ScalarOperand, ShapeError};

use num_traits::{AsPrimitive, FromPrimitive, NumAssignOps, NumCast, Signed};
use rand::distributions::uniform::SampleUniform;
use rand::seq::SliceRandom;
use rand::Rng;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use std::collections::HashSet;
use std::fmt;
use std::iter::Sum;

use crate::error::{Error, Result};

mod subset;
pub use subset::FeatureSubset;

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points. They are used in the records of a dataset.
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Signed
    + Sum
    + NumAssignOps
    + AsPrimitive<usize>
    + SampleUniform
    + ScalarOperand
    + approx::AbsDiffEq
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// Dataset
///
/// Labelled records for a binary classification task. The records form a two-dimensional matrix
/// with dimensionality (nsamples, nfeatures), every row carries one boolean target and every
/// column a unique feature name.
///
/// A dataset is built once and only read afterwards. Its row order is kept as given, fold
/// partitions are computed from it.
///
/// ```rust
/// use featsel::{Dataset, FeatureSubset};
/// use ndarray::array;
///
/// let dataset = Dataset::new(
///     array![[1., 10.], [2., 20.], [3., 30.]],
///     array![false, true, true],
/// )?
/// .with_feature_names(vec!["FICO.Score", "Amount.Requested"])?;
///
/// let subset = FeatureSubset::new(vec!["Amount.Requested"])?;
/// assert_eq!(dataset.resolve(&subset)?, vec![1]);
/// # Ok::<(), featsel::Error>(())
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<F> {
    records: Array2<F>,
    targets: Array1<bool>,
    feature_names: Vec<String>,
}

impl<F: Float> Dataset<F> {
    /// Create a new dataset from records and targets
    ///
    /// Features are named `feature-0`, `feature-1`, ... until
    /// [`with_feature_names`](Self::with_feature_names) is called.
    ///
    /// # Errors
    ///
    /// Returns `Error::Shape` if the number of targets differs from the number of records.
    pub fn new(records: Array2<F>, targets: Array1<bool>) -> Result<Self> {
        if records.nrows() != targets.len() {
            return Err(ShapeError::from_kind(ErrorKind::IncompatibleShape).into());
        }

        let feature_names = (0..records.ncols())
            .map(|idx| format!("feature-{}", idx))
            .collect();

        Ok(Dataset {
            records,
            targets,
            feature_names,
        })
    }

    /// Assign names to the features
    ///
    /// # Errors
    ///
    /// Returns `Error::Shape` if the number of names differs from the number of features and
    /// `Error::InvalidSubset` if a name occurs twice.
    pub fn with_feature_names<I, S>(mut self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(Into::into).collect::<Vec<String>>();

        if names.len() != self.nfeatures() {
            return Err(ShapeError::from_kind(ErrorKind::IncompatibleShape).into());
        }

        let mut seen = HashSet::with_capacity(names.len());
        if let Some(duplicate) = names.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(Error::InvalidSubset(format!(
                "feature name {} occurs more than once",
                duplicate
            )));
        }

        self.feature_names = names;
        Ok(self)
    }

    pub fn records(&self) -> ArrayView2<F> {
        self.records.view()
    }

    pub fn targets(&self) -> ArrayView1<bool> {
        self.targets.view()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn nsamples(&self) -> usize {
        self.records.nrows()
    }

    pub fn nfeatures(&self) -> usize {
        self.records.ncols()
    }

    /// Column index of a named feature
    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.feature_names.iter().position(|x| x == name)
    }

    /// Map the names of a subset to column indices, keeping the order of the subset
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSubset` if a name is not part of this dataset.
    pub fn resolve(&self, subset: &FeatureSubset) -> Result<Vec<usize>> {
        subset
            .iter()
            .map(|name| {
                self.feature_index(name).ok_or_else(|| {
                    Error::InvalidSubset(format!("unknown feature {}", name))
                })
            })
            .collect()
    }

    /// Copy the selected columns into a new record matrix
    pub fn select_columns(&self, columns: &[usize]) -> Array2<F> {
        self.records.select(Axis(1), columns)
    }

    /// Number of negative and positive targets
    pub fn class_counts(&self) -> (usize, usize) {
        let positives = self.targets.iter().filter(|x| **x).count();
        (self.nsamples() - positives, positives)
    }

    /// Return a copy with randomly permuted rows
    ///
    /// Fold partitions follow the row order, use this before evaluation when the rows are sorted
    /// in a meaningful way.
    pub fn shuffle<R: Rng>(&self, rng: &mut R) -> Self {
        let mut indices = (0..self.nsamples()).collect::<Vec<_>>();
        indices.shuffle(rng);

        Dataset {
            records: self.records.select(Axis(0), &indices),
            targets: self.targets.select(Axis(0), &indices),
            feature_names: self.feature_names.clone(),
        }
    }
}
