use featsel::traits::{Fit, Predict};
use featsel::Float;
use ndarray::{Array1, ArrayView1, ArrayView2, Axis, ErrorKind, ShapeError};
use ndarray_stats::QuantileExt;
use std::collections::HashMap;

use crate::error::{NaiveBayesError, Result};
use crate::hyperparams::GaussianNbValidParams;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

impl<F: Float> Fit<F> for GaussianNbValidParams<F> {
    type Object = GaussianNb<F>;
    type Error = NaiveBayesError;

    fn fit(&self, x: ArrayView2<F>, y: ArrayView1<bool>) -> Result<Self::Object> {
        if x.nrows() != y.len() {
            let err = ShapeError::from_kind(ErrorKind::IncompatibleShape);
            return Err(featsel::Error::from(err).into());
        }
        if x.nrows() == 0 {
            return Err(NaiveBayesError::NotEnoughSamples);
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(NaiveBayesError::NonFinite);
        }

        // If the ratio of the variance between dimensions is too small, it will cause
        // numerical errors. We address this by artificially boosting the variance
        // by `epsilon` (a small fraction of the variance of the largest feature)
        let epsilon = self.var_smoothing() * *x.var_axis(Axis(0), F::zero()).max()?;

        let mut class_info = HashMap::new();
        for class in [false, true] {
            // We filter for records that correspond to the current class
            let rows = y
                .iter()
                .enumerate()
                .filter(|(_, label)| **label == class)
                .map(|(i, _)| i)
                .collect::<Vec<_>>();

            if rows.is_empty() {
                continue;
            }

            let xclass = x.select(Axis(0), &rows);

            // unwrap is safe because None is returned only when number of records
            // along the specified axis is 0, we skipped empty classes
            let theta = xclass.mean_axis(Axis(0)).unwrap();
            let sigma = xclass.var_axis(Axis(0), F::zero()) + epsilon;

            if sigma.iter().any(|s| *s <= F::zero()) {
                return Err(NaiveBayesError::ZeroVariance);
            }

            class_info.insert(
                class,
                GaussianClassInfo {
                    class_count: rows.len(),
                    prior: F::cast(rows.len()) / F::cast(x.nrows()),
                    theta,
                    sigma,
                },
            );
        }

        Ok(GaussianNb { class_info })
    }
}

/// Fitted Gaussian Naive Bayes classifier.
///
/// See [GaussianNbParams](crate::GaussianNbParams) for more information on the hyper-parameters.
///
/// # Model assumptions
///
/// The family of Naive Bayes classifiers assume independence between variables. They do not model
/// moments between variables and lack therefore in modelling capability. The advantage is a linear
/// fitting time with maximum-likelihood training in a closed form.
///
/// A model fitted on a single class predicts that class for every record.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianNb<F> {
    class_info: HashMap<bool, GaussianClassInfo<F>>,
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Default, Clone, PartialEq)]
struct GaussianClassInfo<F> {
    class_count: usize,
    prior: F,
    theta: Array1<F>,
    sigma: Array1<F>,
}

impl<F: Float> GaussianNb<F> {
    /// Classes seen during fitting, negative class first
    pub fn classes(&self) -> Vec<bool> {
        [false, true]
            .iter()
            .copied()
            .filter(|class| self.class_info.contains_key(class))
            .collect()
    }

    /// Number of training records of a class
    pub fn class_count(&self, class: bool) -> usize {
        self.class_info
            .get(&class)
            .map(|info| info.class_count)
            .unwrap_or(0)
    }

    /// Compute the unnormalized posterior log probabilities.
    /// The result is returned as an HashMap indexing log probabilities for each samples (eg x rows) by classes
    /// (eg jll\[class\] -> (n_samples,) array)
    pub fn joint_log_likelihood(&self, x: ArrayView2<F>) -> HashMap<bool, Array1<F>> {
        let mut joint_log_likelihood = HashMap::new();

        for (class, info) in self.class_info.iter() {
            let jointi = info.prior.ln();

            let mut nij = info
                .sigma
                .mapv(|x| F::cast(2. * std::f64::consts::PI) * x)
                .mapv(|x| x.ln())
                .sum();
            nij = F::cast(-0.5) * nij;

            let nij = ((x.to_owned() - &info.theta).mapv(|x| x.powi(2)) / &info.sigma)
                .sum_axis(Axis(1))
                .mapv(|x| x * F::cast(0.5))
                .mapv(|x| nij - x);

            joint_log_likelihood.insert(*class, nij + jointi);
        }

        joint_log_likelihood
    }

    /// Compute the probability of the positive class for each sample
    pub fn predict_proba(&self, x: ArrayView2<F>) -> Array1<F> {
        let jll = self.joint_log_likelihood(x);

        match (jll.get(&false), jll.get(&true)) {
            // normalize with the log-sum-exp trick
            (Some(neg), Some(pos)) => neg
                .iter()
                .zip(pos.iter())
                .map(|(n, p)| {
                    let max = if n > p { *n } else { *p };
                    let pos = (*p - max).exp();
                    pos / ((*n - max).exp() + pos)
                })
                .collect(),
            (None, Some(_)) => Array1::from_elem(x.nrows(), F::one()),
            _ => Array1::zeros(x.nrows()),
        }
    }
}

impl<F: Float> Predict<F> for GaussianNb<F> {
    // Identify the class with the maximum log likelihood, ties go to the negative class
    fn predict(&self, x: ArrayView2<F>) -> Array1<bool> {
        let jll = self.joint_log_likelihood(x);

        match (jll.get(&false), jll.get(&true)) {
            (Some(neg), Some(pos)) => neg
                .iter()
                .zip(pos.iter())
                .map(|(n, p)| p > n)
                .collect(),
            (None, Some(_)) => Array1::from_elem(x.nrows(), true),
            _ => Array1::from_elem(x.nrows(), false),
        }
    }
}
