//! In-memory play-by-play tables
//!
//! [`PlayTable`] holds the rows produced by the loader collaborator together with
//! the names of the columns that were actually present in the source. Projectors
//! call [`PlayTable::require_columns`] before touching the rows so that a source
//! selected without a needed column fails loudly instead of silently yielding
//! empty features.
//!
//! # Examples
//!
//! ```
//! use nflmodels_data::PlayTable;
//!
//! let csv = "game_id,play_id,posteam,game_half\n2021_01_BAL_LV,1,BAL,Half1\n";
//! let table = PlayTable::read_csv(csv.as_bytes())?;
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.records()[0].posteam.as_deref(), Some("BAL"));
//!
//! let err = table.require_columns(&["posteam", "wind"]).unwrap_err();
//! assert_eq!(err.missing, ["wind"]);
//! # Ok::<(), nflmodels_data::LoadError>(())
//! ```

use std::{fs::File, io, path::Path};

use crate::record::PlayRecord;

/// Error while reading a play-by-play table.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("failed to open {path}: {source}")]
    Open { path: String, source: io::Error },
    #[display("failed to read play-by-play CSV: {source}")]
    Csv { source: csv::Error },
    #[display("{source}")]
    MissingColumns { source: MissingColumnsError },
}

/// One or more required source columns are not present in the table.
///
/// This is a configuration error: the caller has to re-select the source
/// columns (see [`ColumnSelection`](crate::preset::ColumnSelection)).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("missing required columns: {}", missing.join(", "))]
pub struct MissingColumnsError {
    #[error(not(source))]
    pub missing: Vec<String>,
}

/// A loaded play-by-play table.
#[derive(Debug, Clone, Default)]
pub struct PlayTable {
    columns: Vec<String>,
    records: Vec<PlayRecord>,
}

impl PlayTable {
    /// Creates a table from rows and the names of the source columns.
    #[must_use]
    pub fn new(columns: Vec<String>, records: Vec<PlayRecord>) -> Self {
        Self { columns, records }
    }

    /// Creates a table from rows, assuming every [`PlayRecord`] column is present.
    #[must_use]
    pub fn from_records(records: Vec<PlayRecord>) -> Self {
        let columns = PlayRecord::COLUMNS.iter().map(|&c| c.to_owned()).collect();
        Self { columns, records }
    }

    /// Reads a CSV table with a header row.
    ///
    /// Fails with [`LoadError::MissingColumns`] if `game_id` is absent, since
    /// rows cannot be attributed to a game without it.
    pub fn read_csv<R>(reader: R) -> Result<Self, LoadError>
    where
        R: io::Read,
    {
        let mut reader = csv::Reader::from_reader(reader);
        let columns = reader
            .headers()
            .map_err(|source| LoadError::Csv { source })?
            .iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();
        check_columns(&columns, &["game_id"])
            .map_err(|source| LoadError::MissingColumns { source })?;

        let records = reader
            .deserialize::<PlayRecord>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| LoadError::Csv { source })?;
        log::debug!(
            "read {} plays with {} source columns",
            records.len(),
            columns.len()
        );
        Ok(Self { columns, records })
    }

    /// Opens and reads a CSV file.
    pub fn read_csv_file<P>(path: P) -> Result<Self, LoadError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Self::read_csv(io::BufReader::new(file))
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn records(&self) -> &[PlayRecord] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<PlayRecord> {
        self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Checks that every column in `required` was present in the source.
    pub fn require_columns(&self, required: &[&str]) -> Result<(), MissingColumnsError> {
        check_columns(&self.columns, required)
    }
}

fn check_columns(columns: &[String], required: &[&str]) -> Result<(), MissingColumnsError> {
    let missing = required
        .iter()
        .filter(|r| !columns.iter().any(|c| c == *r))
        .map(|&r| r.to_owned())
        .collect::<Vec<_>>();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(MissingColumnsError { missing })
    }
}

/// Filters records to the given seasons.
///
/// An empty `seasons` slice keeps every record.
pub fn filter_seasons<'a>(
    records: &'a [PlayRecord],
    seasons: &'a [u16],
) -> impl Iterator<Item = &'a PlayRecord> + 'a {
    records
        .iter()
        .filter(move |r| seasons.is_empty() || r.season.is_some_and(|s| seasons.contains(&s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
play_id,game_id,season,posteam,game_half,wind,weather,extra_column
1,2021_01_A_B,2021,A,Half1,NA,NA,x
2,2021_01_A_B,2021,,Half1,5,\"Sunny Wind: SW 8 mph\",y
3,2020_01_A_B,2020,B,Half2,,,z
";

    #[test]
    fn test_read_csv_handles_missing_values() {
        let table = PlayTable::read_csv(CSV.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        let records = table.records();
        assert_eq!(records[0].wind, None);
        assert_eq!(records[0].weather, None);
        assert_eq!(records[1].posteam, None);
        assert_eq!(records[1].wind, Some(5.0));
        assert_eq!(records[2].play_id, Some(3.0));
        assert_eq!(records[2].season, Some(2020));
        // Columns not backed by a record field are ignored but still listed
        assert!(table.columns().iter().any(|c| c == "extra_column"));
    }

    #[test]
    fn test_read_csv_requires_game_id() {
        let err = PlayTable::read_csv("play_id,posteam\n1,A\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumns { .. }));
    }

    #[test]
    fn test_require_columns_reports_all_missing() {
        let table = PlayTable::read_csv(CSV.as_bytes()).unwrap();
        let err = table
            .require_columns(&["posteam", "roof", "sp", "wind"])
            .unwrap_err();
        assert_eq!(err.missing, ["roof", "sp"]);
        assert_eq!(err.to_string(), "missing required columns: roof, sp");
        assert!(table.require_columns(&["game_id", "weather"]).is_ok());
    }

    #[test]
    fn test_filter_seasons() {
        let table = PlayTable::read_csv(CSV.as_bytes()).unwrap();
        assert_eq!(filter_seasons(table.records(), &[]).count(), 3);
        assert_eq!(filter_seasons(table.records(), &[2020]).count(), 1);
        assert_eq!(filter_seasons(table.records(), &[1999]).count(), 0);
    }
}
