//! Play-by-play data model for the nflmodels workspace.
//!
//! This crate defines the raw input every other crate consumes:
//!
//! - [`record`]: [`PlayRecord`], one row of a play-by-play table, and [`PlayType`]
//! - [`preset`]: the preset list of source columns and [`ColumnSelection`](preset::ColumnSelection)
//! - [`table`]: [`PlayTable`], CSV loading and required-column validation
//! - [`order`]: the chronological sort order the scoring-event labeler relies on
//!
//! Fetching the data (database or release downloads) is left to the caller; this
//! crate only reads tables that have already been exported to CSV.
//!
//! # Example
//!
//! ```
//! use nflmodels_data::{PlayTable, order};
//!
//! let csv = "\
//! game_id,play_id,game_seconds_remaining,posteam
//! g1,20,1800,A
//! g1,10,3600,B
//! ";
//! let mut records = PlayTable::read_csv(csv.as_bytes())?.into_records();
//! order::sort_plays(&mut records);
//! assert_eq!(records[0].play_id, Some(10.0));
//! # Ok::<(), nflmodels_data::LoadError>(())
//! ```

pub use self::{
    record::{ParsePlayTypeError, PlayRecord, PlayType, flag},
    table::{LoadError, MissingColumnsError, PlayTable},
};

pub mod order;
pub mod preset;
pub mod record;
pub mod table;
