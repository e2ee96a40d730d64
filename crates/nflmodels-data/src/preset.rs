//! Source column presets
//!
//! The loader collaborator selects a fixed preset of play-by-play columns that
//! covers everything the projectors need: game and team identifiers, the
//! situation (clock, down, distance, field position), scoring columns and the
//! environment (roof, weather, wind).
//!
//! [`ColumnSelection`] combines the preset with caller-chosen extra columns.
//!
//! ```
//! use nflmodels_data::preset::ColumnSelection;
//!
//! let selection = ColumnSelection::preset().with_columns(["temp", "game_id"]);
//! assert_eq!(selection.columns().last().map(String::as_str), Some("temp"));
//! assert_eq!(selection.columns().iter().filter(|c| *c == "game_id").count(), 1);
//! ```

/// Preset collection of source columns required to build every model.
pub const PRESET_COLUMNS: &[&str] = &[
    "play_id",
    "game_id",
    "home_team",
    "away_team",
    "posteam",
    "posteam_type",
    "defteam",
    "yardline_100",
    "quarter_seconds_remaining",
    "half_seconds_remaining",
    "game_seconds_remaining",
    "quarter_end",
    "drive",
    "sp",
    "qtr",
    "game_half",
    "down",
    "goal_to_go",
    "yrdln",
    "ydstogo",
    "ydsnet",
    "play_type",
    "yards_gained",
    "shotgun",
    "no_huddle",
    "qb_dropback",
    "qb_kneel",
    "qb_spike",
    "qb_scramble",
    "pass_length",
    "pass_location",
    "air_yards",
    "yards_after_catch",
    "run_location",
    "run_gap",
    "field_goal_result",
    "kick_distance",
    "extra_point_result",
    "two_point_conv_result",
    "posteam_timeouts_remaining",
    "defteam_timeouts_remaining",
    "timeout",
    "timeout_team",
    "td_team",
    "posteam_score",
    "defteam_score",
    "score_differential",
    "posteam_score_post",
    "defteam_score_post",
    "score_differential_post",
    "ep",
    "epa",
    "wp",
    "def_wp",
    "home_wp",
    "away_wp",
    "wpa",
    "penalty",
    "safety",
    "interception",
    "touchdown",
    "pass_touchdown",
    "rush_touchdown",
    "return_touchdown",
    "extra_point_attempt",
    "two_point_attempt",
    "field_goal_attempt",
    "kickoff_attempt",
    "punt_attempt",
    "complete_pass",
    "penalty_team",
    "penalty_yards",
    "season",
    "drive_ended_with_score",
    "away_score",
    "home_score",
    "game_stadium",
    "roof",
    "surface",
    "weather",
    "wind",
    "temp",
    "kicker_player_name",
];

/// An ordered set of source columns to select.
///
/// Insertion order is preserved and duplicates are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSelection {
    columns: Vec<String>,
}

impl ColumnSelection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a selection holding [`PRESET_COLUMNS`].
    #[must_use]
    pub fn preset() -> Self {
        Self::new().with_columns(PRESET_COLUMNS.iter().copied())
    }

    /// Adds columns that are not already selected.
    #[must_use]
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for column in columns {
            let column = column.into();
            if !self.columns.contains(&column) {
                self.columns.push(column);
            }
        }
        self
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_has_no_duplicates() {
        let selection = ColumnSelection::preset();
        assert_eq!(selection.columns().len(), PRESET_COLUMNS.len());
    }

    #[test]
    fn test_preset_covers_record_columns() {
        let selection = ColumnSelection::preset();
        for column in crate::PlayRecord::COLUMNS {
            assert!(
                selection.columns().iter().any(|c| c == column),
                "{column} missing from preset"
            );
        }
    }

    #[test]
    fn test_with_columns_keeps_order() {
        let selection = ColumnSelection::new().with_columns(["b", "a", "b", "c"]);
        assert_eq!(selection.columns(), ["b", "a", "c"]);
    }
}
