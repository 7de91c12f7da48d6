//! Utility functions for randomly generating datasets

use featsel::Dataset;
use ndarray::{s, Array, Array1, Array2, Axis};
use ndarray_rand::{
    rand::Rng,
    rand_distr::{Distribution, Normal, StandardNormal},
    RandomExt,
};

/// Generate a binary classification dataset with a known set of useful features.
///
/// Rows alternate between the positive and the negative class, starting with the positive one.
/// The first `n_informative` features (named `informative-{i}`) are drawn from a unit normal
/// centered at `+separation` for positive and `-separation` for negative rows. The remaining
/// `n_noise` features (named `noise-{i}`) are standard normal and carry no information about
/// the label.
pub fn make_informative(
    n_samples: usize,
    n_informative: usize,
    n_noise: usize,
    separation: f64,
    rng: &mut impl Rng,
) -> Dataset<f64> {
    let targets = (0..n_samples).map(|i| i % 2 == 0).collect::<Array1<bool>>();

    let mut records: Array2<f64> =
        Array::random_using((n_samples, n_informative + n_noise), StandardNormal, rng);

    let shift = targets.mapv(|label| if label { separation } else { -separation });
    records
        .slice_mut(s![.., ..n_informative])
        .axis_iter_mut(Axis(1))
        .for_each(|mut column| column += &shift);

    let names = (0..n_informative)
        .map(|i| format!("informative-{}", i))
        .chain((0..n_noise).map(|i| format!("noise-{}", i)));

    Dataset::new(records, targets)
        .and_then(|dataset| dataset.with_feature_names(names))
        .unwrap()
}

/// Generate a dataset with a single feature `x` which separates the classes perfectly.
///
/// Row `2j` holds `x = j + 1` with a positive label, row `2j + 1` holds `x = -(j + 1)` with a
/// negative label. For an even `n_pairs` both contiguous halves of the rows hold the classes in
/// equal shares, so a two-fold evaluation trains on both classes. With a single pair each half
/// holds only one class.
pub fn symmetric_line(n_pairs: usize) -> Dataset<f64> {
    let records = (0..2 * n_pairs)
        .map(|i| {
            let magnitude = (i / 2 + 1) as f64;
            if i % 2 == 0 {
                magnitude
            } else {
                -magnitude
            }
        })
        .collect::<Array1<f64>>()
        .insert_axis(Axis(1));
    let targets = records.column(0).mapv(|x| x > 0.);

    Dataset::new(records, targets)
        .and_then(|dataset| dataset.with_feature_names(vec!["x"]))
        .unwrap()
}

/// Append `n_noise` features drawn from `distribution` to a dataset.
///
/// The new features are named `noise-{i}`, continuing after already existing noise columns.
pub fn with_noise(
    dataset: &Dataset<f64>,
    n_noise: usize,
    distribution: impl Distribution<f64>,
    rng: &mut impl Rng,
) -> Dataset<f64> {
    let noise: Array2<f64> = Array::random_using((dataset.nsamples(), n_noise), distribution, rng);
    let offset = dataset
        .feature_names()
        .iter()
        .filter(|name| name.starts_with("noise-"))
        .count();

    let mut records = dataset.records().to_owned();
    for column in noise.axis_iter(Axis(1)) {
        records.push_column(column).unwrap();
    }

    let names = dataset
        .feature_names()
        .iter()
        .cloned()
        .chain((0..n_noise).map(|i| format!("noise-{}", offset + i)));

    Dataset::new(records, dataset.targets().to_owned())
        .and_then(|dataset| dataset.with_feature_names(names))
        .unwrap()
}

/// Centered normal noise with a given spread, for [`with_noise`]
///
/// # Panics
///
/// If `std_dev` is negative or not finite.
pub fn gaussian_noise(std_dev: f64) -> Normal<f64> {
    Normal::new(0., std_dev).unwrap()
}
