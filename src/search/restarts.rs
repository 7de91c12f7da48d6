use log::info;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::hill_climb::{FeatureSubsetSearch, SearchRun};
use super::hyperparams::{RestartParams, RestartValidParams};
use crate::dataset::FeatureSubset;
use crate::error::Result;
use crate::metrics_classification::Score;
use crate::param_guard::ParamGuard;
use crate::traits::SubsetScorer;

/// Best subset found so far
///
/// The accumulator is only replaced by a strictly better score. On ties the subset found first
/// is kept.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalBest {
    subset: FeatureSubset,
    score: Score,
}

impl GlobalBest {
    pub fn new(subset: FeatureSubset, score: Score) -> Self {
        GlobalBest { subset, score }
    }

    /// Replace the current best if `score` is strictly greater, returns whether it was replaced
    pub fn offer(&mut self, subset: &FeatureSubset, score: Score) -> bool {
        if score > self.score {
            self.subset = subset.clone();
            self.score = score;
            true
        } else {
            false
        }
    }

    pub fn subset(&self) -> &FeatureSubset {
        &self.subset
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn into_inner(self) -> (FeatureSubset, Score) {
        (self.subset, self.score)
    }
}

/// Outcome of the restart optimization
#[derive(Debug, Clone)]
pub struct Optimization {
    best: GlobalBest,
    initial_score: Score,
    runs: Vec<SearchRun>,
    trajectory: Vec<Score>,
}

impl Optimization {
    /// Best subset over all runs
    pub fn best(&self) -> &GlobalBest {
        &self.best
    }

    pub fn into_best(self) -> GlobalBest {
        self.best
    }

    pub fn initial_score(&self) -> Score {
        self.initial_score
    }

    /// Every search run in run order
    pub fn runs(&self) -> &[SearchRun] {
        &self.runs
    }

    /// Best score after each run, non-decreasing
    pub fn trajectory(&self) -> &[Score] {
        &self.trajectory
    }
}

/// Random restarts of the feature subset search
///
/// Runs [`FeatureSubsetSearch`] several times, each time with a fresh random candidate order,
/// and keeps the best subset over all runs. Every run draws from its own random number
/// generator, seeded from a master generator, so the runs are executed in parallel and the
/// result only depends on the seed.
///
/// ```rust
/// use featsel::prelude::*;
/// use featsel::search::OptimizationDriver;
///
/// # struct Weights;
/// # impl SubsetScorer for Weights {
/// #     fn check_subset(&self, _: &FeatureSubset) -> Result<()> { Ok(()) }
/// #     fn score_subset(&self, s: &FeatureSubset) -> Result<Score> {
/// #         let w = |x: &str| match x { "FICO.Score" => 50, "Loan.Length" => 20, "Home.Type" => 1, _ => 0 };
/// #         Score::new(s.iter().map(|x| w(x.as_str())).sum(), 100)
/// #     }
/// # }
/// let universe = ["FICO.Score", "Amount.Requested", "Home.Type", "Loan.Length"];
/// let initial = FeatureSubset::new(vec!["FICO.Score", "Amount.Requested"])?;
///
/// let optimization = OptimizationDriver::params()
///     .n_runs(4)
///     .seed(7)
///     .optimize(&Weights, &universe, initial)?;
///
/// assert_eq!(optimization.best().score().correct(), 71);
/// assert_eq!(optimization.runs().len(), 4);
/// # Ok::<(), featsel::Error>(())
/// ```
pub struct OptimizationDriver;

impl OptimizationDriver {
    pub fn params() -> RestartParams {
        RestartParams::new()
    }

    /// Fold finished runs into the global best, in run order
    ///
    /// Returns the best score after every run.
    pub fn reduce(best: &mut GlobalBest, runs: &[SearchRun]) -> Vec<Score> {
        runs.iter()
            .enumerate()
            .map(|(i, run)| {
                if best.offer(run.subset(), run.score()) {
                    info!(
                        "run {}: new best subset {} with {}",
                        i + 1,
                        run.subset(),
                        run.score()
                    );
                }
                best.score()
            })
            .collect()
    }
}

impl RestartValidParams {
    /// Search for the best subset of `universe` which contains `initial`
    ///
    /// # Errors
    ///
    /// * `Error::InvalidSubset` if the universe is invalid, see [`FeatureSubsetSearch::new`]
    /// * `Error::InitializationFailure` if the initial subset cannot be scored
    pub fn optimize<S, T>(
        &self,
        scorer: &S,
        universe: &[T],
        initial: FeatureSubset,
    ) -> Result<Optimization>
    where
        S: SubsetScorer + Sync,
        T: AsRef<str>,
    {
        let search = FeatureSubsetSearch::new(scorer, universe, initial)?;
        let initial_score = search.initial_score();
        let n_runs = self
            .n_runs()
            .unwrap_or_else(|| search.candidates().len().max(1));

        info!(
            "start {} runs from {} ({}) over {} candidates",
            n_runs,
            search.initial(),
            initial_score,
            search.candidates().len()
        );

        // independent random streams for every run
        let mut master = SmallRng::seed_from_u64(self.seed());
        let seeds = (0..n_runs).map(|_| master.gen()).collect::<Vec<u64>>();

        let runs = seeds
            .into_par_iter()
            .map(|seed| {
                let mut rng = SmallRng::seed_from_u64(seed);
                search.run(&mut rng)
            })
            .collect::<Vec<_>>();

        let mut best = GlobalBest::new(search.initial().clone(), initial_score);
        let trajectory = OptimizationDriver::reduce(&mut best, &runs);

        info!(
            "finished {} runs, best subset {} with {}",
            n_runs,
            best.subset(),
            best.score()
        );

        Ok(Optimization {
            best,
            initial_score,
            runs,
            trajectory,
        })
    }
}

impl RestartParams {
    /// Verify the parameters and run the optimization, see [`RestartValidParams::optimize`]
    pub fn optimize<S, T>(
        &self,
        scorer: &S,
        universe: &[T],
        initial: FeatureSubset,
    ) -> Result<Optimization>
    where
        S: SubsetScorer + Sync,
        T: AsRef<str>,
    {
        self.check_ref()?.optimize(scorer, universe, initial)
    }
}
