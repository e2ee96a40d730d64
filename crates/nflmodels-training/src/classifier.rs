//! The classifier seam of the model adapter.
//!
//! Any model that can be fitted on a [`FeatureTable`] with integer class codes
//! and can return per-class probabilities implements [`Classifier`]. The adapter
//! ([`crate::model`]) only talks to this trait.

use nflmodels_features::FeatureTable;

/// Error while fitting a classifier.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum FitError {
    #[display("cannot fit on an empty dataset")]
    EmptyDataset,
    #[display("feature table has {rows} rows but {targets} targets were given")]
    LengthMismatch { rows: usize, targets: usize },
    #[display("at least two classes are required, got {n_classes}")]
    TooFewClasses {
        #[error(not(source))]
        n_classes: usize,
    },
    #[display("class code {class} is out of range for {n_classes} classes")]
    ClassOutOfRange { class: usize, n_classes: usize },
}

/// Error while predicting with a classifier.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PredictError {
    #[display("classifier has not been fitted")]
    NotFitted,
    #[display("classifier was fitted on {expected} features but got {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },
}

/// A trainable multi-class classifier.
pub trait Classifier {
    /// Fits the classifier to features `x` and class codes `y` in `0..n_classes`.
    fn fit(&mut self, x: &FeatureTable, y: &[usize], n_classes: usize) -> Result<(), FitError>;

    /// Returns one probability row per feature row; row `i` column `k` is the
    /// probability of class `k`.
    fn predict_proba(&self, x: &FeatureTable) -> Result<Vec<Vec<f64>>, PredictError>;

    /// Returns the most probable class of each row.
    fn predict(&self, x: &FeatureTable) -> Result<Vec<usize>, PredictError> {
        let probabilities = self.predict_proba(x)?;
        Ok(probabilities.iter().map(|p| argmax(p)).collect())
    }
}

/// Index of the largest value; the first one wins ties.
#[must_use]
pub fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |best, (i, &v)| {
            if v > best.1 { (i, v) } else { best }
        })
        .0
}

/// Validates fit inputs shared by every classifier.
pub(crate) fn check_fit_input(
    x: &FeatureTable,
    y: &[usize],
    n_classes: usize,
) -> Result<(), FitError> {
    if x.is_empty() {
        return Err(FitError::EmptyDataset);
    }
    if x.n_rows() != y.len() {
        return Err(FitError::LengthMismatch {
            rows: x.n_rows(),
            targets: y.len(),
        });
    }
    if n_classes < 2 {
        return Err(FitError::TooFewClasses { n_classes });
    }
    if let Some(&class) = y.iter().find(|&&c| c >= n_classes) {
        return Err(FitError::ClassOutOfRange { class, n_classes });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_prefers_first_on_ties() {
        assert_eq!(argmax(&[0.2, 0.5, 0.3]), 1);
        assert_eq!(argmax(&[0.5, 0.5]), 0);
    }

    #[test]
    fn test_check_fit_input() {
        let mut x = FeatureTable::new(vec!["a".to_owned()]);
        assert_eq!(check_fit_input(&x, &[], 2), Err(FitError::EmptyDataset));
        x.push_row(vec![1.0]);
        x.push_row(vec![2.0]);
        assert_eq!(
            check_fit_input(&x, &[0], 2),
            Err(FitError::LengthMismatch {
                rows: 2,
                targets: 1
            })
        );
        assert_eq!(
            check_fit_input(&x, &[0, 0], 1),
            Err(FitError::TooFewClasses { n_classes: 1 })
        );
        assert_eq!(
            check_fit_input(&x, &[0, 2], 2),
            Err(FitError::ClassOutOfRange {
                class: 2,
                n_classes: 2
            })
        );
        assert_eq!(check_fit_input(&x, &[0, 1], 2), Ok(()));
    }
}
