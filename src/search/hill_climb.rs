use log::{debug, error, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::dataset::FeatureSubset;
use crate::error::{Error, Result};
use crate::metrics_classification::Score;
use crate::traits::SubsetScorer;

/// Randomized first-improvement search over feature additions
///
/// The search starts from a required subset, which is never removed, and tries to append every
/// remaining feature of the universe exactly once. A candidate is kept if the extended subset
/// scores strictly better than the current one, otherwise it is dropped. Ties are rejected and
/// favour the smaller subset.
///
/// The order of the candidates decides which local optimum is reached. It is either given
/// explicitly with [`run_with_order`](Self::run_with_order) or drawn from a random number
/// generator with [`run`](Self::run). A single search run is a pure function of that order.
pub struct FeatureSubsetSearch<'a, S> {
    scorer: &'a S,
    initial: FeatureSubset,
    candidates: Vec<String>,
    initial_score: Score,
}

impl<'a, S: SubsetScorer> FeatureSubsetSearch<'a, S> {
    /// Prepare a search over `universe`, starting from `initial`
    ///
    /// The candidate pool consists of all features of the universe which are not part of the
    /// initial subset, in universe order. The initial subset is scored once here.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidSubset` if the universe is empty, contains a feature twice or a feature
    ///   unknown to the scorer
    /// * `Error::InitializationFailure` if the initial subset cannot be scored
    pub fn new<T: AsRef<str>>(
        scorer: &'a S,
        universe: &[T],
        initial: FeatureSubset,
    ) -> Result<Self> {
        let universe = FeatureSubset::new(universe.iter().map(|x| x.as_ref()))?;
        scorer.check_subset(&universe)?;

        let initial_score = scorer
            .score_subset(&initial)
            .map_err(|err| Error::InitializationFailure(Box::new(err)))?;

        let candidates = universe
            .iter()
            .filter(|name| !initial.contains(name))
            .cloned()
            .collect();

        Ok(FeatureSubsetSearch {
            scorer,
            initial,
            candidates,
            initial_score,
        })
    }

    pub fn initial(&self) -> &FeatureSubset {
        &self.initial
    }

    pub fn initial_score(&self) -> Score {
        self.initial_score
    }

    /// Optional features which may be appended to the initial subset
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Run the search with a uniformly random candidate order
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> SearchRun {
        let mut order = (0..self.candidates.len()).collect::<Vec<_>>();
        order.shuffle(rng);

        self.climb(&order)
    }

    /// Run the search trying candidates in the given order
    ///
    /// # Errors
    ///
    /// Returns `Error::Parameters` if `order` is not a permutation of the candidate indices.
    pub fn run_with_order(&self, order: &[usize]) -> Result<SearchRun> {
        let mut seen = vec![false; self.candidates.len()];
        let is_permutation = order.len() == seen.len()
            && order
                .iter()
                .all(|&i| i < seen.len() && !std::mem::replace(&mut seen[i], true));

        if !is_permutation {
            return Err(Error::Parameters(format!(
                "order {:?} is not a permutation of {} candidates",
                order,
                self.candidates.len()
            )));
        }

        Ok(self.climb(order))
    }

    fn climb(&self, order: &[usize]) -> SearchRun {
        let mut subset = self.initial.clone();
        let mut score = self.initial_score;
        let mut trials = Vec::with_capacity(order.len());

        for &idx in order {
            let candidate = &self.candidates[idx];

            // candidates are distinct and disjoint from the current subset
            let outcome = match subset
                .with_feature(candidate)
                .and_then(|trial| Ok((self.scorer.score_subset(&trial)?, trial)))
            {
                Ok((trial_score, trial)) if trial_score > score => {
                    debug!(
                        "accept {}: {} > {}",
                        candidate,
                        trial_score.correct(),
                        score.correct()
                    );
                    subset = trial;
                    score = trial_score;
                    TrialOutcome::Accepted(trial_score)
                }
                Ok((trial_score, _)) => {
                    debug!(
                        "reject {}: {} <= {}",
                        candidate,
                        trial_score.correct(),
                        score.correct()
                    );
                    TrialOutcome::Rejected(trial_score)
                }
                Err(err) if err.is_recoverable() => {
                    warn!("reject {}: evaluation failed, {}", candidate, err);
                    TrialOutcome::Failed(err)
                }
                // the scorer broke its own contract, the run still continues
                Err(err) => {
                    error!("reject {}: unexpected scorer error, {}", candidate, err);
                    TrialOutcome::Failed(err)
                }
            };

            trials.push(Trial {
                candidate: candidate.clone(),
                outcome,
            });
        }

        SearchRun {
            subset,
            score,
            initial_score: self.initial_score,
            trials,
        }
    }
}

/// Result of trying a single candidate
#[derive(Debug, Clone)]
pub enum TrialOutcome {
    /// The extended subset scored strictly better and became the current subset
    Accepted(Score),
    /// The extended subset did not improve the score
    Rejected(Score),
    /// The extended subset could not be evaluated, counts as rejection
    Failed(Error),
}

#[derive(Debug, Clone)]
pub struct Trial {
    pub(crate) candidate: String,
    pub(crate) outcome: TrialOutcome,
}

impl Trial {
    pub fn candidate(&self) -> &str {
        &self.candidate
    }

    pub fn outcome(&self) -> &TrialOutcome {
        &self.outcome
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self.outcome, TrialOutcome::Accepted(_))
    }
}

/// Locally optimal subset of a single search run, together with its trace
#[derive(Debug, Clone)]
pub struct SearchRun {
    pub(crate) subset: FeatureSubset,
    pub(crate) score: Score,
    pub(crate) initial_score: Score,
    pub(crate) trials: Vec<Trial>,
}

impl SearchRun {
    pub fn subset(&self) -> &FeatureSubset {
        &self.subset
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn initial_score(&self) -> Score {
        self.initial_score
    }

    /// Every candidate in the order it was tried
    pub fn trials(&self) -> &[Trial] {
        &self.trials
    }

    /// Scores at the acceptance events, strictly increasing
    pub fn accepted_scores(&self) -> Vec<Score> {
        self.trials
            .iter()
            .filter_map(|trial| match trial.outcome {
                TrialOutcome::Accepted(score) => Some(score),
                _ => None,
            })
            .collect()
    }

    /// Number of candidates whose evaluation failed
    pub fn nfailed(&self) -> usize {
        self.trials
            .iter()
            .filter(|trial| matches!(trial.outcome, TrialOutcome::Failed(_)))
            .count()
    }
}
