use ndarray_stats::errors::MinMaxError;
use thiserror::Error;

/// Simplified `Result` using [`NaiveBayesError`](crate::NaiveBayesError) as error type
pub type Result<T> = std::result::Result<T, NaiveBayesError>;

/// Error variants from hyper-parameter construction or model estimation
#[derive(Error, Debug, Clone)]
pub enum NaiveBayesError {
    /// Error when performing Max operation on data
    #[error("invalid statistical operation {0}")]
    Stats(#[from] MinMaxError),
    /// Invalid smoothing parameter
    #[error("invalid smoothing parameter {0}")]
    InvalidSmoothing(f64),
    /// The training partition is empty
    #[error("not enough samples to estimate the class distributions")]
    NotEnoughSamples,
    /// The training partition contains NaN or infinite values
    #[error("records contain non-finite values")]
    NonFinite,
    /// Every feature is constant, the class likelihoods are degenerate
    #[error("all features have zero variance")]
    ZeroVariance,
    #[error(transparent)]
    BaseCrate(#[from] featsel::Error),
}
