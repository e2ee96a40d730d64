//! Class code assignment for categorical targets.

use std::fmt;

/// The sorted set of distinct target values of a dataset.
///
/// A value's class code is its position in the set. Build it from every row of
/// a dataset before splitting so training and validation share the same codes.
///
/// # Examples
///
/// ```
/// use nflmodels_training::targets::ClassTargets;
///
/// let targets = ClassTargets::from_values(&["td", "fg", "td", "no_score"]);
/// assert_eq!(targets.classes(), ["fg", "no_score", "td"]);
/// assert_eq!(targets.encode(&["td", "fg"]), Some(vec![2, 0]));
/// assert_eq!(targets.encode(&["safety"]), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTargets<T> {
    classes: Vec<T>,
}

impl<T> ClassTargets<T>
where
    T: Ord + Clone,
{
    #[must_use]
    pub fn from_values(values: &[T]) -> Self {
        let mut classes = values.to_vec();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    #[must_use]
    pub fn classes(&self) -> &[T] {
        &self.classes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    #[must_use]
    pub fn code(&self, value: &T) -> Option<usize> {
        self.classes.binary_search(value).ok()
    }

    #[must_use]
    pub fn class(&self, code: usize) -> Option<&T> {
        self.classes.get(code)
    }

    /// Class codes of `values`, or `None` if any value is not a known class.
    #[must_use]
    pub fn encode(&self, values: &[T]) -> Option<Vec<usize>> {
        values.iter().map(|v| self.code(v)).collect()
    }

    /// Display names of the classes, in code order.
    #[must_use]
    pub fn names(&self) -> Vec<String>
    where
        T: fmt::Display,
    {
        self.classes.iter().map(ToString::to_string).collect()
    }
}
