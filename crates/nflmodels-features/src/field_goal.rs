//! Field goal success features
//!
//! Projects kicking plays into a binary classification dataset whose target,
//! `kick_result`, is `1` for a successful kick and `0` otherwise.
//!
//! # Pipeline
//!
//! ```text
//! plays
//!   ↓ filter: play_type == field_goal (or extra_point), seasons
//!   ↓ kick_result = max(fg made, xp good)
//!   ↓ closed, wind       (optional, drops rows without resolvable wind)
//!   ↓ kicker bucketing   (optional, rare or inactive kickers become "Other")
//!   ↓ one-hot encode kicker_player_name
//! Dataset<u8>
//! ```
//!
//! Rows without `yardline_100` are dropped, since the feature matrix never holds
//! missing values.

use std::{collections::HashMap, str::FromStr};

use nflmodels_data::{MissingColumnsError, PlayRecord, PlayTable, PlayType, table::filter_seasons};

use crate::{
    encoding::OneHotSchema,
    table::{Dataset, DropReport, Preprocessed, ProjectedRow, assemble},
    wind::{effective_wind, is_closed_roof},
};

/// Name of the target column.
pub const TARGET: &str = "kick_result";

/// Kickers on active rosters at the start of the 2022 season.
pub const ACTIVE_KICKERS: &[&str] = &[
    "M.Badgley",
    "T.Bass",
    "C.Boswell",
    "R.Bullock",
    "H.Butker",
    "D.Carlson",
    "M.Crosby",
    "C.Dicker",
    "J.Elliott",
    "K.Fairbairn",
    "N.Folk",
    "G.Gano",
    "M.Gay",
    "R.Gould",
    "G.Joseph",
    "Y.Koo",
    "W.Lutz",
    "B.Maher",
    "C.McLaughlin",
    "B.McManus",
    "E.McPherson",
    "J.Myers",
    "R.Patterson",
    "E.Pineiro",
    "M.Prater",
    "J.Sanders",
    "C.Santos",
    "J.Slye",
    "R.Succop",
    "J.Tucker",
    "T.Vizcaino",
    "C.York",
    "G.Zuerlein",
];

/// Bucket name for kickers that are not encoded individually.
pub const OTHER_KICKER: &str = "Other";

const KICKER_COLUMN: &str = "kicker_player_name";

/// Which kickers keep their own indicator column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KickerPolicy {
    /// Only kickers in the allow-list; everyone else becomes [`OTHER_KICKER`]
    Active(Vec<String>),
    /// Every kicker present in the data
    All,
}

impl KickerPolicy {
    /// The [`Active`](Self::Active) policy with [`ACTIVE_KICKERS`].
    #[must_use]
    pub fn active() -> Self {
        Self::Active(ACTIVE_KICKERS.iter().map(|&k| k.to_owned()).collect())
    }

    fn bucket(&self, kicker: Option<&str>) -> Option<String> {
        match self {
            Self::Active(allowed) => Some(
                kicker
                    .filter(|&k| allowed.iter().any(|a| a == k))
                    .unwrap_or(OTHER_KICKER)
                    .to_owned(),
            ),
            Self::All => kicker.map(str::to_owned),
        }
    }
}

impl Default for KickerPolicy {
    fn default() -> Self {
        Self::active()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown kicker policy '{value}', use \"active\" or \"all\"")]
pub struct ParseKickerPolicyError {
    #[error(not(source))]
    pub value: String,
}

impl FromStr for KickerPolicy {
    type Err = ParseKickerPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::active()),
            "all" => Ok(Self::All),
            _ => Err(ParseKickerPolicyError {
                value: s.to_owned(),
            }),
        }
    }
}

/// Options of the field goal projector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGoalOptions {
    /// Seasons to keep; empty keeps all
    pub seasons: Vec<u16>,
    /// Include extra point attempts
    pub use_extra_points: bool,
    /// Include the `closed` and `wind` features
    pub use_wind: bool,
    /// Include the one-hot encoded kicker
    pub use_kickers: bool,
    pub kickers: KickerPolicy,
    /// Kickers with at most this many attempts are bucketed into [`OTHER_KICKER`]
    pub kicker_threshold: usize,
}

impl Default for FieldGoalOptions {
    fn default() -> Self {
        Self {
            seasons: vec![],
            use_extra_points: true,
            use_wind: true,
            use_kickers: true,
            kickers: KickerPolicy::default(),
            kicker_threshold: 100,
        }
    }
}

impl FieldGoalOptions {
    fn required_columns(&self) -> Vec<&'static str> {
        let mut columns = vec!["play_type", "field_goal_result", "yardline_100"];
        if !self.seasons.is_empty() {
            columns.push("season");
        }
        if self.use_extra_points {
            columns.push("extra_point_result");
        }
        if self.use_wind {
            columns.extend(["roof", "wind", "weather"]);
        }
        if self.use_kickers {
            columns.push(KICKER_COLUMN);
        }
        columns
    }

    fn continuous_columns(&self) -> Vec<&'static str> {
        let mut columns = vec!["yardline_100"];
        if self.use_wind {
            columns.extend(["closed", "wind"]);
        }
        columns
    }

    fn categorical_columns(&self) -> Vec<&'static str> {
        if self.use_kickers {
            vec![KICKER_COLUMN]
        } else {
            vec![]
        }
    }

    fn is_kick(&self, play: &PlayRecord) -> bool {
        match play.play_type() {
            Some(PlayType::FieldGoal) => true,
            Some(PlayType::ExtraPoint) => self.use_extra_points,
            _ => false,
        }
    }
}

/// Success of a field goal attempt: only `made` counts.
#[must_use]
pub fn field_goal_success(result: Option<&str>) -> u8 {
    u8::from(result == Some("made"))
}

/// Success of an extra point attempt: only `good` counts.
#[must_use]
pub fn extra_point_success(result: Option<&str>) -> u8 {
    u8::from(result == Some("good"))
}

/// Target value of a kicking play.
#[must_use]
pub fn kick_result(play: &PlayRecord, use_extra_points: bool) -> u8 {
    let field_goal = field_goal_success(play.field_goal_result.as_deref());
    if use_extra_points {
        field_goal.max(extra_point_success(play.extra_point_result.as_deref()))
    } else {
        field_goal
    }
}

/// Applies the kicker policy, then buckets kickers with at most `threshold`
/// attempts into [`OTHER_KICKER`].
///
/// Attempts are counted over the given kicks after the policy is applied.
#[must_use]
pub fn bucket_kickers(
    kickers: &[Option<&str>],
    policy: &KickerPolicy,
    threshold: usize,
) -> Vec<Option<String>> {
    let bucketed = kickers
        .iter()
        .map(|&k| policy.bucket(k))
        .collect::<Vec<_>>();
    let mut counts = HashMap::<&str, usize>::new();
    for kicker in bucketed.iter().flatten() {
        *counts.entry(kicker.as_str()).or_default() += 1;
    }
    let rare = counts
        .into_iter()
        .filter(|&(_, count)| count <= threshold)
        .map(|(kicker, _)| kicker.to_owned())
        .collect::<Vec<_>>();
    bucketed
        .into_iter()
        .map(|kicker| kicker.map(|k| if rare.contains(&k) { OTHER_KICKER.to_owned() } else { k }))
        .collect()
}

/// Projects a play table into the field goal dataset.
///
/// When `schema` is given the kicker column is encoded with it instead of a
/// schema fitted on this table.
///
/// # Errors
///
/// Returns an error if a column needed by `options` is missing from the table.
pub fn preprocess(
    table: &PlayTable,
    options: &FieldGoalOptions,
    schema: Option<&OneHotSchema>,
) -> Result<Preprocessed<Dataset<u8>>, MissingColumnsError> {
    table.require_columns(&options.required_columns())?;
    log::info!("preprocessing {} rows for field goals", table.len());

    let mut dropped = DropReport::new();
    let kicks = filter_seasons(table.records(), &options.seasons)
        .filter(|play| options.is_kick(play))
        .collect::<Vec<_>>();

    let before = kicks.len();
    let kicks = kicks
        .into_iter()
        .filter(|play| play.yardline_100.is_some())
        .collect::<Vec<_>>();
    dropped.record("missing yardline_100", before - kicks.len());

    let mut winds = kicks.iter().map(|play| effective_wind(play)).collect::<Vec<_>>();
    let kicks = if options.use_wind {
        let before = kicks.len();
        let (kicks, kept_winds): (Vec<_>, Vec<_>) = kicks
            .into_iter()
            .zip(winds)
            .filter(|(_, wind)| wind.is_some())
            .unzip();
        dropped.record("missing wind", before - kicks.len());
        winds = kept_winds;
        kicks
    } else {
        kicks
    };

    let kickers = if options.use_kickers {
        let names = kicks
            .iter()
            .map(|play| play.kicker_player_name.as_deref())
            .collect::<Vec<_>>();
        bucket_kickers(&names, &options.kickers, options.kicker_threshold)
    } else {
        vec![None; kicks.len()]
    };

    let rows = kicks
        .iter()
        .zip(winds)
        .zip(kickers)
        .filter_map(|((play, wind), kicker)| {
            let mut continuous = vec![play.yardline_100?];
            if options.use_wind {
                continuous.push(f64::from(u8::from(is_closed_roof(play.roof.as_deref()))));
                continuous.push(wind?.trunc());
            }
            let categorical = if options.use_kickers {
                vec![kicker]
            } else {
                vec![]
            };
            Some(ProjectedRow {
                continuous,
                categorical,
                target: kick_result(play, options.use_extra_points),
            })
        })
        .collect::<Vec<_>>();
    log::info!("field goal dataset has {} rows", rows.len());

    let data = assemble(
        TARGET,
        &options.continuous_columns(),
        &options.categorical_columns(),
        rows,
        schema,
    );
    Ok(Preprocessed { data, dropped })
}
