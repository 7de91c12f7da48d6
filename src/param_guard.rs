use std::error::Error;

use ndarray::{ArrayView1, ArrayView2};

use crate::{dataset::Float, traits::Fit};

/// A set of hyperparameters whose values have not been checked for validity. A reference to the
/// checked hyperparameters can only be obtained after checking has completed. If `Fit` has been
/// implemented on the checked hyperparameters, it will also be implemented on the unchecked
/// hyperparameters with the checking step done automatically.
///
/// The hyperparameter validation done in `check_ref()` and `check()` should be identical.
pub trait ParamGuard {
    /// The checked hyperparameters
    type Checked;
    /// Error type resulting from failed hyperparameter checking
    type Error: Error;

    /// Checks the hyperparameters and returns a reference to the checked hyperparameters if
    /// successful
    fn check_ref(&self) -> Result<&Self::Checked, Self::Error>;

    /// Checks the hyperparameters and returns the checked hyperparameters if successful
    fn check(self) -> Result<Self::Checked, Self::Error>;

    /// Calls `check()` and unwraps the result
    fn check_unwrap(self) -> Self::Checked
    where
        Self: Sized,
    {
        self.check().unwrap()
    }
}

/// Performs the checking step and calls `fit` on the checked hyperparameters. If checking failed,
/// the checking error is converted to the error type of the checked `Fit` and returned.
impl<F, P> Fit<F> for P
where
    F: Float,
    P: ParamGuard,
    P::Checked: Fit<F>,
    <P::Checked as Fit<F>>::Error: From<P::Error>,
{
    type Object = <P::Checked as Fit<F>>::Object;
    type Error = <P::Checked as Fit<F>>::Error;

    fn fit(
        &self,
        records: ArrayView2<F>,
        targets: ArrayView1<bool>,
    ) -> Result<Self::Object, Self::Error> {
        let checked = self.check_ref()?;
        checked.fit(records, targets)
    }
}
