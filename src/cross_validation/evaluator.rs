use log::trace;
use ndarray::{s, Array1, Axis};

use super::folds::FoldPartition;
use crate::dataset::{Dataset, FeatureSubset, Float};
use crate::error::{Error, Result};
use crate::metrics_classification::{ConfusionMatrix, Score, ToConfusionMatrix};
use crate::traits::{Fit, Predict, SubsetScorer};

/// K-fold cross-validation of a classifier on feature subsets
///
/// The evaluator borrows a dataset and the parameters of a classifier. For every fold it fits
/// the classifier on the remaining rows, restricted to the columns of the evaluated subset, and
/// predicts the rows of the fold. Each row is therefore predicted exactly once by a model which
/// never saw it during training.
///
/// ```rust
/// use featsel::prelude::*;
/// use featsel::cross_validation::KFoldEvaluator;
/// # use ndarray::{Array1, ArrayView1, ArrayView2};
/// # struct Sign;
/// # impl Fit<f64> for Sign {
/// #     type Object = Sign;
/// #     type Error = Error;
/// #     fn fit(&self, _: ArrayView2<f64>, _: ArrayView1<bool>) -> Result<Sign> { Ok(Sign) }
/// # }
/// # impl Predict<f64> for Sign {
/// #     fn predict(&self, x: ArrayView2<f64>) -> Array1<bool> { x.column(0).mapv(|v| v > 0.) }
/// # }
/// use ndarray::array;
///
/// let dataset = Dataset::new(
///     array![[1.], [-1.], [2.], [-2.]],
///     array![true, false, true, false],
/// )?
/// .with_feature_names(vec!["x"])?;
///
/// let evaluator = KFoldEvaluator::new(&dataset, &Sign, 2)?;
/// let score = evaluator.score(&FeatureSubset::new(vec!["x"])?)?;
/// assert_eq!(score.correct(), 4);
/// # Ok::<(), featsel::Error>(())
/// ```
pub struct KFoldEvaluator<'a, F, C> {
    dataset: &'a Dataset<F>,
    classifier: &'a C,
    folds: FoldPartition,
}

impl<'a, F: Float, C: Fit<F>> KFoldEvaluator<'a, F, C> {
    /// # Errors
    ///
    /// Returns `Error::InvalidFoldCount` if `n_folds < 2` or `n_folds` exceeds the number of
    /// samples.
    pub fn new(dataset: &'a Dataset<F>, classifier: &'a C, n_folds: usize) -> Result<Self> {
        let folds = FoldPartition::new(dataset.nsamples(), n_folds)?;

        Ok(KFoldEvaluator {
            dataset,
            classifier,
            folds,
        })
    }

    pub fn dataset(&self) -> &Dataset<F> {
        self.dataset
    }

    pub fn folds(&self) -> &FoldPartition {
        &self.folds
    }

    /// Number of correct out-of-fold predictions for a subset
    pub fn score(&self, subset: &FeatureSubset) -> Result<Score> {
        self.evaluate(subset).map(|cv| cv.score())
    }

    /// Cross-validate a subset and keep the out-of-fold prediction of every row
    ///
    /// # Errors
    ///
    /// * `Error::InvalidSubset` if a feature of the subset does not exist in the dataset
    /// * `Error::TrainingFailure` if the classifier could not be fitted on a fold or returned
    ///   the wrong number of predictions
    pub fn evaluate(&self, subset: &FeatureSubset) -> Result<CrossValidation> {
        let columns = self.dataset.resolve(subset)?;
        let records = self.dataset.select_columns(&columns);
        let targets = self.dataset.targets();

        let mut predictions = Array1::from_elem(self.dataset.nsamples(), false);

        for fold in self.folds.iter() {
            let train = fold.train_indices();
            let test = fold.test_indices();

            let model = self
                .classifier
                .fit(
                    records.select(Axis(0), &train).view(),
                    targets.select(Axis(0), &train).view(),
                )
                .map_err(|err| Error::TrainingFailure {
                    fold: fold.index(),
                    reason: err.to_string(),
                })?;

            let fold_predictions = model.predict(records.slice(s![test.clone(), ..]));
            if fold_predictions.len() != test.len() {
                return Err(Error::TrainingFailure {
                    fold: fold.index(),
                    reason: format!(
                        "{} predictions for {} rows",
                        fold_predictions.len(),
                        test.len()
                    ),
                });
            }

            trace!(
                "fold {} of {}: trained on {} rows, predicted {} rows",
                fold.index() + 1,
                self.folds.nfolds(),
                train.len(),
                test.len()
            );

            predictions.slice_mut(s![test]).assign(&fold_predictions);
        }

        let score = Score::from_predictions(&predictions, &targets)?;

        Ok(CrossValidation {
            subset: subset.clone(),
            targets: targets.to_owned(),
            predictions,
            folds: self.folds.clone(),
            score,
        })
    }
}

impl<'a, F, C> SubsetScorer for KFoldEvaluator<'a, F, C>
where
    F: Float,
    C: Fit<F>,
{
    fn check_subset(&self, subset: &FeatureSubset) -> Result<()> {
        self.dataset.resolve(subset).map(|_| ())
    }

    fn score_subset(&self, subset: &FeatureSubset) -> Result<Score> {
        self.score(subset)
    }
}

/// Outcome of a cross-validation run
///
/// Holds the true target, the out-of-fold prediction and the fold of every row. This is what a
/// reporting or plotting layer consumes.
#[derive(Debug, Clone)]
pub struct CrossValidation {
    subset: FeatureSubset,
    targets: Array1<bool>,
    predictions: Array1<bool>,
    folds: FoldPartition,
    score: Score,
}

impl CrossValidation {
    pub fn subset(&self) -> &FeatureSubset {
        &self.subset
    }

    pub fn targets(&self) -> &Array1<bool> {
        &self.targets
    }

    pub fn predictions(&self) -> &Array1<bool> {
        &self.predictions
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Fold index in which every row was predicted
    pub fn fold_assignment(&self) -> Array1<usize> {
        (0..self.targets.len())
            .map(|row| self.folds.fold_of(row).unwrap_or_default())
            .collect()
    }

    /// Rows whose out-of-fold prediction differs from the target
    pub fn misclassified(&self) -> Vec<usize> {
        self.targets
            .iter()
            .zip(self.predictions.iter())
            .enumerate()
            .filter(|(_, (truth, pred))| truth != pred)
            .map(|(row, _)| row)
            .collect()
    }

    pub fn confusion_matrix(&self) -> Result<ConfusionMatrix> {
        self.predictions.confusion_matrix(&self.targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2, ArrayView1, ArrayView2};
    use std::cell::RefCell;
    use thiserror::Error;

    #[derive(Error, Debug)]
    #[error("mock failure {0}")]
    struct MockError(String);

    /// Predicts the majority label of its training partition and remembers which rows it was
    /// trained on by their first column.
    struct MockMajority {
        seen: RefCell<Vec<Vec<usize>>>,
    }

    struct MockMajorityModel {
        label: bool,
    }

    impl Fit<f64> for MockMajority {
        type Object = MockMajorityModel;
        type Error = MockError;

        fn fit(
            &self,
            records: ArrayView2<f64>,
            targets: ArrayView1<bool>,
        ) -> std::result::Result<Self::Object, Self::Error> {
            self.seen
                .borrow_mut()
                .push(records.column(0).iter().map(|x| *x as usize).collect());

            let positives = targets.iter().filter(|x| **x).count();
            Ok(MockMajorityModel {
                label: 2 * positives > targets.len(),
            })
        }
    }

    impl Predict<f64> for MockMajorityModel {
        fn predict(&self, records: ArrayView2<f64>) -> Array1<bool> {
            Array1::from_elem(records.nrows(), self.label)
        }
    }

    /// Fails as soon as a training partition contains a single class
    struct MockStrict;

    impl Fit<f64> for MockStrict {
        type Object = MockMajorityModel;
        type Error = MockError;

        fn fit(
            &self,
            _records: ArrayView2<f64>,
            targets: ArrayView1<bool>,
        ) -> std::result::Result<Self::Object, Self::Error> {
            if targets.iter().all(|x| *x == targets[0]) {
                return Err(MockError("single class".to_string()));
            }

            Ok(MockMajorityModel { label: true })
        }
    }

    /// Returns one prediction too few
    struct MockShort;

    impl Predict<f64> for MockShort {
        fn predict(&self, records: ArrayView2<f64>) -> Array1<bool> {
            Array1::from_elem(records.nrows() - 1, true)
        }
    }

    impl Fit<f64> for MockShort {
        type Object = MockShort;
        type Error = MockError;

        fn fit(
            &self,
            _records: ArrayView2<f64>,
            _targets: ArrayView1<bool>,
        ) -> std::result::Result<Self::Object, Self::Error> {
            Ok(MockShort)
        }
    }

    fn indexed(n: usize, targets: Vec<bool>) -> Dataset<f64> {
        let records = Array2::from_shape_fn((n, 2), |(i, j)| if j == 0 { i as f64 } else { 1. });
        Dataset::new(records, Array1::from(targets))
            .unwrap()
            .with_feature_names(vec!["row", "one"])
            .unwrap()
    }

    #[test]
    fn rows_are_never_trained_on_when_tested() {
        let dataset = indexed(10, (0..10).map(|i| i % 3 == 0).collect());
        let classifier = MockMajority {
            seen: RefCell::new(Vec::new()),
        };
        let evaluator = KFoldEvaluator::new(&dataset, &classifier, 4).unwrap();
        let subset = FeatureSubset::new(vec!["row"]).unwrap();

        evaluator.evaluate(&subset).unwrap();

        let seen = classifier.seen.borrow();
        assert_eq!(seen.len(), 4);
        for (fold, trained) in evaluator.folds().iter().zip(seen.iter()) {
            assert!(fold.test_indices().all(|row| !trained.contains(&row)));
            assert_eq!(trained.len() + fold.test_indices().len(), 10);
        }
    }

    #[test]
    fn out_of_fold_predictions_are_merged() {
        // the first fold is all positive, the rest mostly negative
        let dataset = indexed(6, vec![true, true, true, false, false, true]);
        let classifier = MockMajority {
            seen: RefCell::new(Vec::new()),
        };
        let evaluator = KFoldEvaluator::new(&dataset, &classifier, 2).unwrap();
        let cv = evaluator
            .evaluate(&FeatureSubset::new(vec!["row", "one"]).unwrap())
            .unwrap();

        // fold 0 is trained on [false, false, true], fold 1 on [true, true, true]
        assert_eq!(
            cv.predictions(),
            &array![false, false, false, true, true, true]
        );
        assert_eq!(cv.score().correct(), 1);
        assert_eq!(cv.score().total(), 6);
        assert_eq!(cv.misclassified(), vec![0, 1, 2, 3, 4]);
        assert_eq!(cv.fold_assignment(), array![0, 0, 0, 1, 1, 1]);

        let cm = cv.confusion_matrix().unwrap();
        assert_eq!(cm.true_positives(), 1);
        assert_eq!(cm.false_positives(), 2);
        assert_eq!(cm.false_negatives(), 3);
        assert_eq!(cm.true_negatives(), 0);
    }

    #[test]
    fn invalid_arguments() {
        let dataset = indexed(4, vec![true, false, true, false]);
        let classifier = MockStrict;

        assert!(matches!(
            KFoldEvaluator::new(&dataset, &classifier, 1),
            Err(Error::InvalidFoldCount(1, _))
        ));
        assert!(matches!(
            KFoldEvaluator::new(&dataset, &classifier, 5),
            Err(Error::InvalidFoldCount(5, _))
        ));

        let evaluator = KFoldEvaluator::new(&dataset, &classifier, 2).unwrap();
        let unknown = FeatureSubset::new(vec!["row", "Monthly.Income"]).unwrap();
        assert!(matches!(
            evaluator.score(&unknown),
            Err(Error::InvalidSubset(_))
        ));
        assert!(evaluator.check_subset(&unknown).is_err());
    }

    #[test]
    fn classifier_failure_is_reported_not_scored() {
        // the second fold trains on the first half, which is positive only
        let dataset = indexed(4, vec![true, true, false, true]);
        let evaluator = KFoldEvaluator::new(&dataset, &MockStrict, 2).unwrap();

        let err = evaluator
            .score(&FeatureSubset::new(vec!["row"]).unwrap())
            .unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(
            err.to_string(),
            "training failed in fold 1: mock failure single class"
        );
    }

    #[test]
    fn short_prediction_is_training_failure() {
        let dataset = indexed(4, vec![true, false, true, false]);
        let evaluator = KFoldEvaluator::new(&dataset, &MockShort, 2).unwrap();

        let err = evaluator
            .score(&FeatureSubset::new(vec!["one"]).unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::TrainingFailure { fold: 0, .. }));
    }
}
