use featsel::{Float, ParamGuard};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::{GaussianNb, NaiveBayesError};

/// A verified hyper-parameter set ready for the estimation of a Gaussian Naive Bayes model
///
/// See [`GaussianNbParams`](crate::GaussianNbParams) for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianNbValidParams<F> {
    // Required for calculation stability
    var_smoothing: F,
}

impl<F: Float> GaussianNbValidParams<F> {
    /// Get the variance smoothing
    pub fn var_smoothing(&self) -> F {
        self.var_smoothing
    }
}

/// A hyper-parameter set during construction
///
/// The parameter set can be verified into a
/// [`GaussianNbValidParams`](crate::GaussianNbValidParams) by calling
/// [ParamGuard::check](Self::check). It is also possible to directly fit a model with
/// [Fit::fit](featsel::traits::Fit::fit) which implicitely verifies the parameter set prior to
/// the model estimation and forwards any error.
///
/// # Parameters
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :---| :--- |
/// | [var_smoothing](Self::var_smoothing) | `1e-9` | Stabilize variance calculation if ratios are small in update step | `[0, inf)` |
///
/// # Errors
///
/// The following errors can come from invalid hyper-parameters:
///
/// Returns [`InvalidSmoothing`](NaiveBayesError::InvalidSmoothing) if the smoothing
/// parameter is negative.
///
/// # Example
///
/// ```rust
/// use featsel_bayes::{GaussianNbParams, GaussianNbValidParams, Result};
/// use featsel::prelude::*;
/// use ndarray::array;
///
/// let x = array![
///     [-2., -1.],
///     [-1., -1.],
///     [-1., -2.],
///     [1., 1.],
///     [1., 2.],
///     [2., 1.]
/// ];
/// let y = array![false, false, false, true, true, true];
///
/// // create a new parameter set with variance smoothing equals `1e-5`
/// let unchecked_params = GaussianNbParams::new()
///     .var_smoothing(1e-5);
///
/// // fit model with unchecked parameter set
/// let model = unchecked_params.fit(x.view(), y.view())?;
///
/// // transform into a verified parameter set
/// let checked_params = unchecked_params.check()?;
///
/// // fitting with the verified parameters only returns errors originating from the data
/// let same_model = checked_params.fit(x.view(), y.view())?;
/// assert_eq!(model, same_model);
/// # Result::Ok(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianNbParams<F>(GaussianNbValidParams<F>);

impl<F: Float> Default for GaussianNbParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> GaussianNbParams<F> {
    /// Create new [GaussianNbParams] set with default values for its parameters
    pub fn new() -> Self {
        Self(GaussianNbValidParams {
            var_smoothing: F::cast(1e-9),
        })
    }

    /// Specifies the portion of the largest variance of all the features that
    /// is added to the variance for calculation stability
    pub fn var_smoothing(mut self, var_smoothing: F) -> Self {
        self.0.var_smoothing = var_smoothing;
        self
    }
}

impl<F: Float> GaussianNb<F> {
    /// Construct a new set of hyperparameters
    pub fn params() -> GaussianNbParams<F> {
        GaussianNbParams::new()
    }
}

impl<F: Float> ParamGuard for GaussianNbParams<F> {
    type Checked = GaussianNbValidParams<F>;
    type Error = NaiveBayesError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        if self.0.var_smoothing.is_negative() {
            Err(NaiveBayesError::InvalidSmoothing(
                self.0.var_smoothing.to_f64().unwrap_or(f64::NAN),
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}
