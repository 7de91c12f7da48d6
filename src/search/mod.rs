//! Feature subset search
//!
//! A [`FeatureSubsetSearch`] performs a single randomized hill climb: starting from a required
//! subset it tries every optional feature once, in random order, and keeps it if the score
//! strictly improves. Since the order decides which local optimum is reached, the
//! [`OptimizationDriver`] restarts the climb many times with independent orders and keeps the best
//! subset over all runs in a [`GlobalBest`].

mod hill_climb;
mod hyperparams;
mod restarts;

pub use hill_climb::{FeatureSubsetSearch, SearchRun, Trial, TrialOutcome};
pub use hyperparams::{RestartParams, RestartValidParams};
pub use restarts::{GlobalBest, Optimization, OptimizationDriver};
