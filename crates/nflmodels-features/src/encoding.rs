//! One-hot encoding with a closed category domain
//!
//! A [`OneHotSchema`] is fitted once, on training data, and then reused to encode
//! any other rows. The set of indicator columns is fixed at fit time:
//!
//! - a value seen during fitting sets its indicator to `1.0`
//! - a value not seen during fitting (or a missing value) sets no indicator
//!
//! This keeps the feature matrix shape stable between training and evaluation
//! data instead of growing a column for every new category.
//!
//! Indicator columns are named `<column>_<category>` and categories are sorted
//! (numerically when every category of a column is a number).
//!
//! # Examples
//!
//! ```
//! use nflmodels_features::encoding::OneHotSchema;
//!
//! let rows = vec![
//!     vec![Some("2".to_owned()), Some("J.Tucker".to_owned())],
//!     vec![Some("10".to_owned()), Some("Other".to_owned())],
//! ];
//! let schema = OneHotSchema::fit(&["down", "kicker"], &rows);
//! assert_eq!(
//!     schema.indicator_names(),
//!     ["down_2", "down_10", "kicker_J.Tucker", "kicker_Other"]
//! );
//!
//! // Unseen categories produce no indicator
//! let encoded = schema.encode(&[Some("3".to_owned()), Some("J.Tucker".to_owned())]);
//! assert_eq!(encoded, [0.0, 0.0, 1.0, 0.0]);
//! ```

use std::{cmp::Ordering, collections::BTreeSet};

/// One categorical source column and its closed set of categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalColumn {
    pub name: String,
    pub categories: Vec<String>,
}

impl CategoricalColumn {
    fn indicator_names(&self) -> impl Iterator<Item = String> + '_ {
        self.categories
            .iter()
            .map(|category| format!("{}_{category}", self.name))
    }
}

/// Closed one-hot encoding schema for a list of categorical columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OneHotSchema {
    columns: Vec<CategoricalColumn>,
}

impl OneHotSchema {
    /// Fits a schema from categorical values.
    ///
    /// Each row holds one value per entry in `names`, in the same order.
    #[must_use]
    pub fn fit<R>(names: &[&str], rows: &[R]) -> Self
    where
        R: AsRef<[Option<String>]>,
    {
        let columns = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let distinct = rows
                    .iter()
                    .filter_map(|row| row.as_ref().get(i).cloned().flatten())
                    .collect::<BTreeSet<_>>();
                let mut categories = distinct.into_iter().collect::<Vec<_>>();
                sort_categories(&mut categories);
                CategoricalColumn {
                    name: (*name).to_owned(),
                    categories,
                }
            })
            .collect();
        Self { columns }
    }

    #[must_use]
    pub fn columns(&self) -> &[CategoricalColumn] {
        &self.columns
    }

    /// Number of indicator columns produced by [`encode`](Self::encode).
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.iter().map(|c| c.categories.len()).sum()
    }

    /// Names of the indicator columns, in encoding order.
    #[must_use]
    pub fn indicator_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .flat_map(CategoricalColumn::indicator_names)
            .collect()
    }

    /// Encodes one row of categorical values into indicator values.
    #[must_use]
    pub fn encode(&self, values: &[Option<String>]) -> Vec<f64> {
        debug_assert_eq!(values.len(), self.columns.len());
        let mut encoded = Vec::with_capacity(self.width());
        for (column, value) in self.columns.iter().zip(values) {
            encoded.extend(
                column
                    .categories
                    .iter()
                    .map(|category| if value.as_ref() == Some(category) { 1.0 } else { 0.0 }),
            );
        }
        encoded
    }
}

/// Formats a numeric category the way it appears in indicator names.
///
/// Integral values drop the fractional part, so a down of `1.0` becomes `"1"`.
#[must_use]
pub fn category_from_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn sort_categories(categories: &mut [String]) {
    let numeric = categories
        .iter()
        .map(|c| c.parse::<f64>().ok())
        .collect::<Option<Vec<_>>>();
    if numeric.is_some() {
        categories.sort_by(|a, b| match (a.parse::<f64>(), b.parse::<f64>()) {
            (Ok(a), Ok(b)) => a.total_cmp(&b),
            _ => Ordering::Equal,
        });
    }
}
