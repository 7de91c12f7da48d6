//! Common metrics for the evaluation of binary classifiers
//!
//! The cross-validated [`Score`] drives the subset search. The [`ConfusionMatrix`] breaks the
//! same predictions down for reporting: precision, recall, accuracy, F1-score and the Matthews
//! correlation coefficient.
use std::cmp::Ordering;
use std::fmt;

use ndarray::prelude::*;
use ndarray::Data;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of correctly predicted labels out of all rows of a dataset
///
/// Scores are compared by their number of correct predictions only. A score is always bounded by
/// its total, `0 <= correct <= total`.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Copy, Clone)]
pub struct Score {
    correct: usize,
    total: usize,
}

impl Score {
    /// # Errors
    ///
    /// Returns `Error::Parameters` if `correct` exceeds `total`.
    pub fn new(correct: usize, total: usize) -> Result<Score> {
        if correct > total {
            return Err(Error::Parameters(format!(
                "{} correct predictions out of {} rows",
                correct, total
            )));
        }

        Ok(Score { correct, total })
    }

    /// Count the positions where prediction and ground truth agree
    pub fn from_predictions<C, D>(
        prediction: &ArrayBase<C, Ix1>,
        ground_truth: &ArrayBase<D, Ix1>,
    ) -> Result<Score>
    where
        C: Data<Elem = bool>,
        D: Data<Elem = bool>,
    {
        if prediction.len() != ground_truth.len() {
            return Err(Error::Parameters(format!(
                "{} predictions for {} targets",
                prediction.len(),
                ground_truth.len()
            )));
        }

        let correct = prediction
            .iter()
            .zip(ground_truth.iter())
            .filter(|(a, b)| a == b)
            .count();

        Ok(Score {
            correct,
            total: ground_truth.len(),
        })
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of wrongly predicted rows
    pub fn misses(&self) -> usize {
        self.total - self.correct
    }

    /// Fraction of correctly predicted rows
    pub fn accuracy(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }

        self.correct as f32 / self.total as f32
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Score) -> bool {
        self.correct == other.correct
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Score) -> Option<Ordering> {
        Some(self.correct.cmp(&other.correct))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:.1}% correct ({} of {}, {} missed)",
            100.0 * self.accuracy(),
            self.correct,
            self.total,
            self.misses()
        )
    }
}

/// Confusion matrix for binary evaluation
///
/// Rows correspond to the target and columns to the prediction, the positive class comes first.
/// The diagonal entries are correct predictions.
#[derive(Clone, PartialEq)]
pub struct ConfusionMatrix {
    matrix: Array2<usize>,
}

impl ConfusionMatrix {
    pub fn true_positives(&self) -> usize {
        self.matrix[(0, 0)]
    }

    pub fn false_negatives(&self) -> usize {
        self.matrix[(0, 1)]
    }

    pub fn false_positives(&self) -> usize {
        self.matrix[(1, 0)]
    }

    pub fn true_negatives(&self) -> usize {
        self.matrix[(1, 1)]
    }

    /// Calculate precision of the positive class
    pub fn precision(&self) -> f32 {
        let predicted = self.matrix.column(0).sum();
        self.true_positives() as f32 / predicted as f32
    }

    /// Calculate recall of the positive class
    pub fn recall(&self) -> f32 {
        let actual = self.matrix.row(0).sum();
        self.true_positives() as f32 / actual as f32
    }

    /// Return accuracy
    pub fn accuracy(&self) -> f32 {
        self.matrix.diag().sum() as f32 / self.matrix.sum() as f32
    }

    /// Return beta score
    pub fn f_score(&self, beta: f32) -> f32 {
        let sb = beta * beta;
        let p = self.precision();
        let r = self.recall();

        (1.0 + sb) * (p * r) / (sb * p + r)
    }

    /// Return beta=1 score
    pub fn f1_score(&self) -> f32 {
        self.f_score(1.0)
    }

    /// Return the Matthews Correlation Coefficient
    ///
    /// Estimates the normalized cross-correlation between target and predicted variable
    pub fn mcc(&self) -> f32 {
        let (tp, fneg, fp, tn) = (
            self.true_positives() as f32,
            self.false_negatives() as f32,
            self.false_positives() as f32,
            self.true_negatives() as f32,
        );

        (tp * tn - fp * fneg) / ((tp + fp) * (tp + fneg) * (tn + fp) * (tn + fneg)).sqrt()
    }
}

/// Print a confusion matrix
impl fmt::Debug for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "classes    | true       | false")?;
        writeln!(
            f,
            "true       | {:<10} | {}",
            self.matrix[(0, 0)],
            self.matrix[(0, 1)]
        )?;
        write!(
            f,
            "false      | {:<10} | {}",
            self.matrix[(1, 0)],
            self.matrix[(1, 1)]
        )
    }
}

/// Build a confusion matrix from predictions and ground truth
pub trait ToConfusionMatrix<D: Data<Elem = bool>> {
    fn confusion_matrix(&self, ground_truth: &ArrayBase<D, Ix1>) -> Result<ConfusionMatrix>;
}

impl<C: Data<Elem = bool>, D: Data<Elem = bool>> ToConfusionMatrix<D> for ArrayBase<C, Ix1> {
    fn confusion_matrix(&self, ground_truth: &ArrayBase<D, Ix1>) -> Result<ConfusionMatrix> {
        if self.len() != ground_truth.len() {
            return Err(Error::Parameters(format!(
                "{} predictions for {} targets",
                self.len(),
                ground_truth.len()
            )));
        }

        let mut matrix = Array2::zeros((2, 2));
        for (truth, pred) in ground_truth.iter().zip(self.iter()) {
            // the positive class is stored first
            matrix[(usize::from(!*truth), usize::from(!*pred))] += 1;
        }

        Ok(ConfusionMatrix { matrix })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn score_counts_agreement() {
        let prediction = array![true, true, false, false, true];
        let ground_truth = array![true, false, false, true, true];

        let score = Score::from_predictions(&prediction, &ground_truth).unwrap();
        assert_eq!(score.correct(), 3);
        assert_eq!(score.total(), 5);
        assert_eq!(score.misses(), 2);
        assert_abs_diff_eq!(score.accuracy(), 0.6);
        assert_eq!(score.to_string(), "60.0% correct (3 of 5, 2 missed)");
    }

    #[test]
    fn score_is_bounded() {
        assert!(Score::new(6, 5).is_err());
        assert!(Score::new(5, 5).is_ok());
        assert!(Score::from_predictions(&array![true], &array![true, false]).is_err());
    }

    #[test]
    fn scores_compare_by_correct_count() {
        let a = Score::new(5, 10).unwrap();
        let b = Score::new(8, 10).unwrap();

        assert!(b > a);
        assert!(!(a > a));
        assert!(a >= a);
    }

    #[test]
    fn equality_agrees_with_ordering() {
        let a = Score::new(5, 10).unwrap();
        let b = Score::new(5, 11).unwrap();

        assert_eq!(a.partial_cmp(&b), Some(Ordering::Equal));
        assert_eq!(a, b);
        assert_ne!(a, Score::new(6, 11).unwrap());
    }

    #[test]
    fn test_confusion_matrix() {
        let prediction = array![true, true, false, false, true, false];
        let ground_truth = array![true, false, false, true, true, false];

        let cm = prediction.confusion_matrix(&ground_truth).unwrap();

        assert_eq!(cm.true_positives(), 2);
        assert_eq!(cm.false_negatives(), 1);
        assert_eq!(cm.false_positives(), 1);
        assert_eq!(cm.true_negatives(), 2);

        assert_abs_diff_eq!(cm.precision(), 2.0 / 3.0);
        assert_abs_diff_eq!(cm.recall(), 2.0 / 3.0);
        assert_abs_diff_eq!(cm.accuracy(), 4.0 / 6.0);
        assert_abs_diff_eq!(cm.f1_score(), 2.0 / 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(cm.mcc(), 1.0 / 3.0, epsilon = 1e-6);
    }
}
