#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::param_guard::ParamGuard;

/// A verified hyper-parameter set ready for the restart optimization
///
/// See [`RestartParams`] for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartValidParams {
    n_runs: Option<usize>,
    seed: u64,
}

impl RestartValidParams {
    /// Number of search runs, `None` runs once per optional candidate
    pub fn n_runs(&self) -> Option<usize> {
        self.n_runs
    }

    /// Seed of the master random number generator
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// A hyper-parameter set during construction
///
/// The parameter set can be verified into a [`RestartValidParams`] by calling
/// [`ParamGuard::check`]. Calling [`optimize`](Self::optimize) directly on the unchecked set
/// verifies it implicitly and forwards any error.
///
/// # Parameters
///
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :--- | :--- |
/// | [n_runs](Self::n_runs) | number of optional candidates | Independent restarts of the local search | `[1, inf)` |
/// | [seed](Self::seed) | `42` | Seed from which the per-run random streams are derived | any |
///
/// # Errors
///
/// Returns `Error::Parameters` if the number of runs is zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartParams(RestartValidParams);

impl Default for RestartParams {
    fn default() -> Self {
        Self::new()
    }
}

impl RestartParams {
    pub fn new() -> Self {
        RestartParams(RestartValidParams {
            n_runs: None,
            seed: 42,
        })
    }

    /// Set the number of independent search runs
    pub fn n_runs(mut self, n_runs: usize) -> Self {
        self.0.n_runs = Some(n_runs);
        self
    }

    /// Set the seed of the master random number generator
    pub fn seed(mut self, seed: u64) -> Self {
        self.0.seed = seed;
        self
    }
}

impl ParamGuard for RestartParams {
    type Checked = RestartValidParams;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.n_runs == Some(0) {
            Err(Error::Parameters(
                "at least one search run is required".to_string(),
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
