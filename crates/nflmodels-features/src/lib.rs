//! Feature projection for the three nflmodels tasks.
//!
//! Each task module turns a [`PlayTable`](nflmodels_data::PlayTable) into a
//! [`Dataset`]: a dense feature table `x` without missing values, one target per
//! row in `y`, and the [`OneHotSchema`] that encoded the categorical columns.
//!
//! | module              | target                       | classes                 |
//! |---------------------|------------------------------|-------------------------|
//! | [`field_goal`]      | `kick_result`                | `0` / `1`               |
//! | [`next_play`]       | `play_type`                  | selected play types     |
//! | [`expected_points`] | `next_score` (normal, pat)   | scoring events          |
//!
//! # Encoding
//!
//! Categorical columns are one-hot encoded with a schema that is closed at fit
//! time (see [`encoding`]). Every projector takes an optional pre-fitted schema
//! so validation rows can be encoded with the columns seen during training.
//!
//! # Dropped rows
//!
//! Rows that cannot be fully resolved (missing wind, missing feature values,
//! impossible labels) are dropped rather than imputed. Projectors report the
//! counts through `log` and return them in a [`DropReport`] next to the data.
//! Only a missing *source column* is an error ([`MissingColumnsError`](nflmodels_data::MissingColumnsError)).
//!
//! # Example
//!
//! ```
//! use nflmodels_data::{PlayRecord, PlayTable};
//! use nflmodels_features::field_goal::{self, FieldGoalOptions};
//!
//! let kick = PlayRecord {
//!     play_type: Some("field_goal".to_owned()),
//!     field_goal_result: Some("made".to_owned()),
//!     yardline_100: Some(17.0),
//!     roof: Some("dome".to_owned()),
//!     ..Default::default()
//! };
//! let table = PlayTable::from_records(vec![kick]);
//! let options = FieldGoalOptions {
//!     use_kickers: false,
//!     ..Default::default()
//! };
//! let dataset = field_goal::preprocess(&table, &options, None)?.data;
//! assert_eq!(dataset.x.columns(), ["yardline_100", "closed", "wind"]);
//! assert_eq!(dataset.x.rows(), [vec![17.0, 1.0, 0.0]]);
//! assert_eq!(dataset.y, [1]);
//! # Ok::<(), nflmodels_data::MissingColumnsError>(())
//! ```

pub use self::{
    encoding::OneHotSchema,
    table::{Dataset, DropReport, FeatureTable, Preprocessed},
};

pub mod encoding;
pub mod expected_points;
pub mod field_goal;
pub mod next_play;
pub mod table;
pub mod wind;
