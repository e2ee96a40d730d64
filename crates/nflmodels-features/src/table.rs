//! Feature tables and datasets
//!
//! A [`FeatureTable`] is a dense, row-major matrix of `f64` feature values with
//! named columns. It contains only numeric and indicator columns and never holds
//! missing values: rows that cannot be fully resolved are dropped by the
//! projectors and counted in a [`DropReport`].
//!
//! A [`Dataset`] pairs a feature table (`X`) with one target value per row (`y`)
//! and the one-hot schema used to encode it.

use std::{fmt, io};

use crate::encoding::OneHotSchema;

/// Dense feature matrix with named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FeatureTable {
    #[must_use]
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    ///
    /// # Panics
    ///
    /// Panics if the row length does not match the number of columns.
    pub fn push_row(&mut self, row: Vec<f64>) {
        assert_eq!(
            row.len(),
            self.columns.len(),
            "row length must match column count"
        );
        self.rows.push(row);
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns all values of a column, or `None` if the column does not exist.
    #[must_use]
    pub fn column_values(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx]).collect())
    }

    /// Returns a new table holding the given rows, in the given order.
    #[must_use]
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    /// Writes the table as CSV with a header row.
    pub fn write_csv<W>(&self, writer: W) -> csv::Result<()>
    where
        W: io::Write,
    {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(ToString::to_string))?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Features, targets and the encoding schema of one task.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<T> {
    /// Name of the target column
    pub target_name: String,
    pub x: FeatureTable,
    pub y: Vec<T>,
    /// Schema used to encode the categorical columns of `x`
    pub schema: OneHotSchema,
}

impl<T> Dataset<T> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.y.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Returns a new dataset holding the given rows, in the given order.
    #[must_use]
    pub fn select_rows(&self, indices: &[usize]) -> Self
    where
        T: Clone,
    {
        Self {
            target_name: self.target_name.clone(),
            x: self.x.select_rows(indices),
            y: indices.iter().map(|&i| self.y[i].clone()).collect(),
            schema: self.schema.clone(),
        }
    }

    /// Converts the target values, keeping features and schema.
    #[must_use]
    pub fn map_target<U, F>(self, f: F) -> Dataset<U>
    where
        F: FnMut(T) -> U,
    {
        Dataset {
            target_name: self.target_name,
            x: self.x,
            y: self.y.into_iter().map(f).collect(),
            schema: self.schema,
        }
    }

    /// Writes features and target as one CSV table, target first.
    pub fn write_merged_csv<W>(&self, writer: W) -> csv::Result<()>
    where
        W: io::Write,
        T: fmt::Display,
    {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(
            std::iter::once(self.target_name.as_str()).chain(self.x.columns().iter().map(String::as_str)),
        )?;
        for (target, row) in self.y.iter().zip(self.x.rows()) {
            writer.write_record(
                std::iter::once(target.to_string()).chain(row.iter().map(ToString::to_string)),
            )?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Counts of rows dropped by a projector, by reason.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropReport {
    entries: Vec<(String, usize)>,
}

impl DropReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records dropped rows; zero counts are ignored.
    pub fn record(&mut self, reason: impl Into<String>, count: usize) {
        if count == 0 {
            return;
        }
        let reason = reason.into();
        log::info!("dropped {count} rows: {reason}");
        match self.entries.iter_mut().find(|(r, _)| *r == reason) {
            Some((_, total)) => *total += count,
            None => self.entries.push((reason, count)),
        }
    }

    /// Number of rows dropped for `reason`.
    #[must_use]
    pub fn count(&self, reason: &str) -> usize {
        self.entries
            .iter()
            .find(|(r, _)| r == reason)
            .map_or(0, |(_, count)| *count)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.entries.iter().map(|(r, c)| (r.as_str(), *c))
    }
}

/// Output of a projector together with the rows it dropped.
#[derive(Debug, Clone)]
pub struct Preprocessed<D> {
    pub data: D,
    pub dropped: DropReport,
}

/// One projected row before encoding.
#[derive(Debug, Clone)]
pub(crate) struct ProjectedRow<T> {
    pub continuous: Vec<f64>,
    pub categorical: Vec<Option<String>>,
    pub target: T,
}

/// Encodes projected rows into a dataset.
///
/// Fits a new schema unless one is given.
pub(crate) fn assemble<T>(
    target_name: &str,
    continuous: &[&str],
    categorical: &[&str],
    rows: Vec<ProjectedRow<T>>,
    schema: Option<&OneHotSchema>,
) -> Dataset<T> {
    let schema = match schema {
        Some(schema) => schema.clone(),
        None => {
            let values = rows.iter().map(|r| &r.categorical[..]).collect::<Vec<_>>();
            OneHotSchema::fit(categorical, &values)
        }
    };
    let columns = continuous
        .iter()
        .map(|&c| c.to_owned())
        .chain(schema.indicator_names())
        .collect();
    let mut x = FeatureTable::new(columns);
    let mut y = Vec::with_capacity(rows.len());
    for row in rows {
        let mut values = row.continuous;
        values.extend(schema.encode(&row.categorical));
        x.push_row(values);
        y.push(row.target);
    }
    Dataset {
        target_name: target_name.to_owned(),
        x,
        y,
        schema,
    }
}
