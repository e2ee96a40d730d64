//! Play-by-play record type
//!
//! A [`PlayRecord`] is one row of an nflverse-style play-by-play table. Only the
//! columns consumed by the feature projectors and the scoring-event labeler are
//! represented; any other column in the source table is ignored on load.
//!
//! # Missing Values
//!
//! Play-by-play exports encode missing values as empty fields or as the literal
//! string `NA`. Every column except `game_id` is optional:
//!
//! - numeric columns become `None` when the field is empty or does not parse
//! - text columns become `None` when the field is empty or `NA`

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

/// A single play from a play-by-play table.
///
/// Field names match the source column names so that records can be
/// deserialized directly from a CSV file with headers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PlayRecord {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub play_id: Option<f64>,
    pub game_id: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub season: Option<u16>,
    /// Team in possession of the ball
    #[serde(default, deserialize_with = "na_as_none")]
    pub posteam: Option<String>,
    /// `home` or `away`
    #[serde(default, deserialize_with = "na_as_none")]
    pub posteam_type: Option<String>,
    #[serde(default, deserialize_with = "na_as_none")]
    pub defteam: Option<String>,
    /// Period segment (`Half1`, `Half2`, `Overtime`)
    #[serde(default, deserialize_with = "na_as_none")]
    pub game_half: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub qtr: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub down: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub goal_to_go: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub ydstogo: Option<f64>,
    /// Distance to the opponent's end zone in yards
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub yardline_100: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub quarter_seconds_remaining: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub half_seconds_remaining: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub game_seconds_remaining: Option<f64>,
    #[serde(default, deserialize_with = "na_as_none")]
    pub play_type: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub shotgun: Option<f64>,
    /// Scoring play flag
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub sp: Option<f64>,
    /// Score differential from the possessing team's view, before the play
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub score_differential: Option<f64>,
    /// Score differential from the possessing team's view, after the play
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub score_differential_post: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub safety: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub extra_point_attempt: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub two_point_attempt: Option<f64>,
    /// `made`, `missed` or `blocked`
    #[serde(default, deserialize_with = "na_as_none")]
    pub field_goal_result: Option<String>,
    /// `good`, `failed`, `blocked` or `aborted`
    #[serde(default, deserialize_with = "na_as_none")]
    pub extra_point_result: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub posteam_timeouts_remaining: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub defteam_timeouts_remaining: Option<f64>,
    /// `outdoors`, `open`, `closed` or `dome`
    #[serde(default, deserialize_with = "na_as_none")]
    pub roof: Option<String>,
    /// Free-text weather description, e.g. `"Sunny Temp: 71° F, Wind: SW 8 mph"`
    #[serde(default, deserialize_with = "na_as_none")]
    pub weather: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub wind: Option<f64>,
    #[serde(default, deserialize_with = "na_as_none")]
    pub kicker_player_name: Option<String>,
}

impl PlayRecord {
    /// Source column names backed by a [`PlayRecord`] field.
    pub const COLUMNS: &'static [&'static str] = &[
        "play_id",
        "game_id",
        "season",
        "posteam",
        "posteam_type",
        "defteam",
        "game_half",
        "qtr",
        "down",
        "goal_to_go",
        "ydstogo",
        "yardline_100",
        "quarter_seconds_remaining",
        "half_seconds_remaining",
        "game_seconds_remaining",
        "play_type",
        "shotgun",
        "sp",
        "score_differential",
        "score_differential_post",
        "safety",
        "extra_point_attempt",
        "two_point_attempt",
        "field_goal_result",
        "extra_point_result",
        "posteam_timeouts_remaining",
        "defteam_timeouts_remaining",
        "roof",
        "weather",
        "wind",
        "kicker_player_name",
    ];

    /// Returns the parsed play type, or `None` if missing or unrecognized.
    #[must_use]
    pub fn play_type(&self) -> Option<PlayType> {
        self.play_type.as_deref()?.parse().ok()
    }

    /// Returns `true` if this play was a scoring play.
    #[must_use]
    pub fn is_scoring_play(&self) -> bool {
        flag(self.sp) == Some(true)
    }

    /// Returns `true` if this play was an extra point or two point attempt.
    #[must_use]
    pub fn is_conversion_attempt(&self) -> bool {
        flag(self.extra_point_attempt) == Some(true) || flag(self.two_point_attempt) == Some(true)
    }
}

/// Interprets a 0/1 indicator column.
///
/// Returns `None` for a missing value so callers can distinguish "not set" from
/// "unknown".
#[must_use]
pub fn flag(value: Option<f64>) -> Option<bool> {
    value.map(|v| v > 0.5)
}

fn na_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty() && s != "NA"))
}

/// Play type as recorded in the `play_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayType {
    Pass,
    Run,
    FieldGoal,
    Punt,
    QbKneel,
    QbSpike,
    ExtraPoint,
    Kickoff,
    NoPlay,
}

impl PlayType {
    pub const ALL: [PlayType; 9] = [
        PlayType::Pass,
        PlayType::Run,
        PlayType::FieldGoal,
        PlayType::Punt,
        PlayType::QbKneel,
        PlayType::QbSpike,
        PlayType::ExtraPoint,
        PlayType::Kickoff,
        PlayType::NoPlay,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PlayType::Pass => "pass",
            PlayType::Run => "run",
            PlayType::FieldGoal => "field_goal",
            PlayType::Punt => "punt",
            PlayType::QbKneel => "qb_kneel",
            PlayType::QbSpike => "qb_spike",
            PlayType::ExtraPoint => "extra_point",
            PlayType::Kickoff => "kickoff",
            PlayType::NoPlay => "no_play",
        }
    }
}

impl fmt::Display for PlayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown play type '{value}'")]
pub struct ParsePlayTypeError {
    #[error(not(source))]
    pub value: String,
}

impl FromStr for PlayType {
    type Err = ParsePlayTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| ParsePlayTypeError {
                value: s.to_owned(),
            })
    }
}
