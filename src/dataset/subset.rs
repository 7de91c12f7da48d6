use std::collections::HashSet;
use std::fmt;
use std::slice;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Feature subset
///
/// An ordered list of distinct feature names, never empty. The order is kept for display
/// purposes and does not influence the score of a subset. Whether the names exist in a dataset
/// is checked by [`Dataset::resolve`](crate::Dataset::resolve).
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureSubset(Vec<String>);

impl FeatureSubset {
    /// Create a new subset from a list of feature names
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSubset` if the list is empty or contains a name twice.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(Into::into).collect::<Vec<String>>();

        if names.is_empty() {
            return Err(Error::InvalidSubset("subset is empty".to_string()));
        }

        let mut seen = HashSet::with_capacity(names.len());
        if let Some(duplicate) = names.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(Error::InvalidSubset(format!(
                "feature {} occurs more than once",
                duplicate
            )));
        }

        Ok(FeatureSubset(names))
    }

    /// Return a new subset with `name` appended
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSubset` if the subset already contains `name`.
    pub fn with_feature(&self, name: &str) -> Result<Self> {
        if self.contains(name) {
            return Err(Error::InvalidSubset(format!(
                "feature {} occurs more than once",
                name
            )));
        }

        let mut names = self.0.clone();
        names.push(name.to_string());
        Ok(FeatureSubset(names))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|x| x == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`, kept for symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a FeatureSubset {
    type Item = &'a String;
    type IntoIter = slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for FeatureSubset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_subset_is_rejected() {
        let err = FeatureSubset::new(Vec::<String>::new()).unwrap_err();
        assert_eq!(err.to_string(), "invalid feature subset subset is empty");
    }

    #[test]
    fn duplicates_are_rejected() {
        assert!(FeatureSubset::new(vec!["FICO.Score", "Home.Type", "FICO.Score"]).is_err());

        let subset = FeatureSubset::new(vec!["FICO.Score"]).unwrap();
        assert!(subset.with_feature("FICO.Score").is_err());
    }

    #[test]
    fn with_feature_appends_and_keeps_original() {
        let subset = FeatureSubset::new(vec!["FICO.Score", "Amount.Requested"]).unwrap();
        let extended = subset.with_feature("Loan.Length").unwrap();

        assert_eq!(subset.len(), 2);
        assert_eq!(
            extended.as_slice(),
            &["FICO.Score", "Amount.Requested", "Loan.Length"]
        );
        assert!(extended.contains("Loan.Length"));
        assert!(!subset.contains("Loan.Length"));
    }

    #[test]
    fn display_lists_names_in_order() {
        let subset = FeatureSubset::new(vec!["b", "a"]).unwrap();
        assert_eq!(subset.to_string(), "[b, a]");
    }
}
