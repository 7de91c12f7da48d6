use std::ops::Range;

use crate::error::{Error, Result};

/// Partition of row indices into `k` contiguous folds
///
/// The rows are taken in dataset order: the first `n % k` folds hold `n / k + 1` rows, the
/// remaining ones `n / k` rows. Every row lands in exactly one fold and the assignment only
/// depends on `(n, k)`, never on the targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldPartition {
    nsamples: usize,
    bounds: Vec<usize>,
}

/// A single fold of a partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    index: usize,
    nsamples: usize,
    test: Range<usize>,
}

impl FoldPartition {
    /// # Errors
    ///
    /// Returns `Error::InvalidFoldCount` if `k < 2` or `k > nsamples`.
    pub fn new(nsamples: usize, k: usize) -> Result<FoldPartition> {
        if k < 2 {
            return Err(Error::InvalidFoldCount(
                k,
                "at least two folds are required".to_string(),
            ));
        }
        if k > nsamples {
            return Err(Error::InvalidFoldCount(
                k,
                format!("more folds than the {} samples", nsamples),
            ));
        }

        let (size, remainder) = (nsamples / k, nsamples % k);
        let mut bounds = Vec::with_capacity(k + 1);
        bounds.push(0);
        for i in 0..k {
            let len = if i < remainder { size + 1 } else { size };
            bounds.push(bounds[i] + len);
        }

        Ok(FoldPartition { nsamples, bounds })
    }

    pub fn nsamples(&self) -> usize {
        self.nsamples
    }

    pub fn nfolds(&self) -> usize {
        self.bounds.len() - 1
    }

    pub fn fold(&self, index: usize) -> Fold {
        Fold {
            index,
            nsamples: self.nsamples,
            test: self.bounds[index]..self.bounds[index + 1],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Fold> + '_ {
        (0..self.nfolds()).map(move |i| self.fold(i))
    }

    /// Index of the fold holding `row` as test row
    pub fn fold_of(&self, row: usize) -> Option<usize> {
        if row >= self.nsamples {
            return None;
        }

        // bounds are sorted, the fold is the last bound not exceeding the row
        Some(self.bounds.partition_point(|b| *b <= row) - 1)
    }
}

impl Fold {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Rows held out for validation
    pub fn test_indices(&self) -> Range<usize> {
        self.test.clone()
    }

    /// Rows used for training, all rows outside of the test range
    pub fn train_indices(&self) -> Vec<usize> {
        (0..self.test.start)
            .chain(self.test.end..self.nsamples)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn invalid_fold_counts() {
        assert!(matches!(
            FoldPartition::new(5, 0),
            Err(Error::InvalidFoldCount(0, _))
        ));
        assert!(matches!(
            FoldPartition::new(5, 1),
            Err(Error::InvalidFoldCount(1, _))
        ));
        assert!(matches!(
            FoldPartition::new(5, 6),
            Err(Error::InvalidFoldCount(6, _))
        ));
        assert!(FoldPartition::new(5, 5).is_ok());
    }

    #[test]
    fn uneven_folds_put_remainder_first() {
        let folds = FoldPartition::new(10, 4).unwrap();
        let sizes = folds.iter().map(|f| f.test_indices().len()).collect::<Vec<_>>();
        assert_eq!(sizes, vec![3, 3, 2, 2]);

        assert_eq!(folds.fold(1).test_indices(), 3..6);
        assert_eq!(folds.fold(1).train_indices(), vec![0, 1, 2, 6, 7, 8, 9]);
    }

    #[test]
    fn folds_cover_every_row_once() {
        for n in 2..40 {
            for k in 2..=n {
                let folds = FoldPartition::new(n, k).unwrap();
                let mut seen = vec![0usize; n];

                for fold in folds.iter() {
                    for row in fold.test_indices() {
                        seen[row] += 1;
                        assert_eq!(folds.fold_of(row), Some(fold.index()));
                    }
                }

                assert!(seen.iter().all(|x| *x == 1), "n = {}, k = {}", n, k);
                let sizes = folds
                    .iter()
                    .map(|f| f.test_indices().len())
                    .collect::<Vec<_>>();
                let (min, max) = (sizes.iter().min().unwrap(), sizes.iter().max().unwrap());
                assert!(max - min <= 1);
            }
        }
    }

    #[test]
    fn train_and_test_never_overlap() {
        let folds = FoldPartition::new(23, 4).unwrap();

        for fold in folds.iter() {
            let train = fold.train_indices().into_iter().collect::<HashSet<_>>();
            assert!(fold.test_indices().all(|row| !train.contains(&row)));
            assert_eq!(train.len() + fold.test_indices().len(), 23);
        }
        assert_eq!(folds.fold_of(23), None);
    }
}
