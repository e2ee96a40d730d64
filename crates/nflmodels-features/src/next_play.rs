//! Next play type features
//!
//! Projects offensive plays into a multi-class dataset whose target is the
//! `play_type` the offense chose (pass, run, field goal, punt, ...), given the
//! game situation before the snap.
//!
//! Rows missing any feature or the target are dropped. `posteam_type` is
//! encoded as `1` for the home team and `0` for the away team, and the integral
//! situation columns (`score_differential`, `down`, `yardline_100`, timeouts)
//! are truncated to whole numbers.

use nflmodels_data::{MissingColumnsError, PlayRecord, PlayTable, PlayType, table::filter_seasons};

use crate::{
    encoding::{OneHotSchema, category_from_number},
    table::{Dataset, DropReport, Preprocessed, ProjectedRow, assemble},
};

/// Name of the target column.
pub const TARGET: &str = "play_type";

/// Continuous feature columns, in output order.
pub const CONTINUOUS: &[&str] = &[
    "score_differential",
    "game_seconds_remaining",
    "half_seconds_remaining",
    "yardline_100",
    "ydstogo",
    "goal_to_go",
    "posteam_type",
    "shotgun",
];

/// Categorical feature columns, one-hot encoded after the continuous ones.
pub const CATEGORICAL: &[&str] = &[
    "qtr",
    "down",
    "posteam_timeouts_remaining",
    "defteam_timeouts_remaining",
];

/// Play types predicted by default.
pub const DEFAULT_PLAY_TYPES: &[PlayType] = &[
    PlayType::Pass,
    PlayType::Run,
    PlayType::FieldGoal,
    PlayType::Punt,
];

/// Options of the next play projector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextPlayOptions {
    /// Seasons to keep; empty keeps all
    pub seasons: Vec<u16>,
    /// Play types to keep, in target code order
    pub play_types: Vec<PlayType>,
}

impl Default for NextPlayOptions {
    fn default() -> Self {
        Self {
            seasons: vec![],
            play_types: DEFAULT_PLAY_TYPES.to_vec(),
        }
    }
}

impl NextPlayOptions {
    /// Integer codes for the selected play types.
    #[must_use]
    pub fn codes(&self) -> PlayTypeCodes {
        PlayTypeCodes::new(self.play_types.clone())
    }
}

/// Invertible mapping between play types and integer class codes.
///
/// The code of a play type is its position in the selected play type list.
///
/// # Examples
///
/// ```
/// use nflmodels_data::PlayType;
/// use nflmodels_features::next_play::PlayTypeCodes;
///
/// let codes = PlayTypeCodes::new(vec![PlayType::Pass, PlayType::Run]);
/// assert_eq!(codes.code(PlayType::Run), Some(1));
/// assert_eq!(codes.play_type(0), Some(PlayType::Pass));
/// assert_eq!(codes.code(PlayType::Punt), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayTypeCodes {
    play_types: Vec<PlayType>,
}

impl PlayTypeCodes {
    #[must_use]
    pub fn new(play_types: Vec<PlayType>) -> Self {
        Self { play_types }
    }

    #[must_use]
    pub fn play_types(&self) -> &[PlayType] {
        &self.play_types
    }

    #[must_use]
    pub fn code(&self, play_type: PlayType) -> Option<usize> {
        self.play_types.iter().position(|&t| t == play_type)
    }

    #[must_use]
    pub fn play_type(&self, code: usize) -> Option<PlayType> {
        self.play_types.get(code).copied()
    }

    /// Replaces play type targets by their codes.
    ///
    /// Rows whose play type has no code are left out.
    #[must_use]
    pub fn encode_dataset(&self, dataset: &Dataset<PlayType>) -> Dataset<usize> {
        let (indices, codes): (Vec<_>, Vec<_>) = dataset
            .y
            .iter()
            .enumerate()
            .filter_map(|(i, &t)| Some((i, self.code(t)?)))
            .unzip();
        let subset = dataset.select_rows(&indices);
        Dataset {
            target_name: subset.target_name,
            x: subset.x,
            y: codes,
            schema: subset.schema,
        }
    }
}

/// Encodes the possessing team's side: `home` is `1`, `away` is `0`.
#[must_use]
pub fn posteam_type_value(posteam_type: Option<&str>) -> Option<f64> {
    match posteam_type? {
        "home" => Some(1.0),
        "away" => Some(0.0),
        _ => None,
    }
}

fn project(play: &PlayRecord) -> Option<ProjectedRow<PlayType>> {
    let target = play.play_type()?;
    let continuous = vec![
        play.score_differential?.trunc(),
        play.game_seconds_remaining?,
        play.half_seconds_remaining?,
        play.yardline_100?.trunc(),
        play.ydstogo?,
        play.goal_to_go?,
        posteam_type_value(play.posteam_type.as_deref())?,
        play.shotgun?,
    ];
    let categorical = [
        play.qtr?,
        play.down?.trunc(),
        play.posteam_timeouts_remaining?.trunc(),
        play.defteam_timeouts_remaining?.trunc(),
    ]
    .map(|v| Some(category_from_number(v)))
    .to_vec();
    Some(ProjectedRow {
        continuous,
        categorical,
        target,
    })
}

/// Projects a play table into the next play dataset.
///
/// When `schema` is given the categorical columns are encoded with it instead
/// of a schema fitted on this table.
///
/// # Errors
///
/// Returns an error if a feature column, `play_type`, or (when filtering by
/// season) `season` is missing from the table.
pub fn preprocess(
    table: &PlayTable,
    options: &NextPlayOptions,
    schema: Option<&OneHotSchema>,
) -> Result<Preprocessed<Dataset<PlayType>>, MissingColumnsError> {
    let mut required = vec![TARGET];
    required.extend(CONTINUOUS);
    required.extend(CATEGORICAL);
    if !options.seasons.is_empty() {
        required.push("season");
    }
    table.require_columns(&required)?;
    log::info!(
        "preprocessing {} rows for play types {:?}",
        table.len(),
        options.play_types
    );

    let plays = filter_seasons(table.records(), &options.seasons)
        .filter(|play| {
            play.play_type()
                .is_some_and(|t| options.play_types.contains(&t))
        })
        .collect::<Vec<_>>();
    let rows = plays
        .iter()
        .filter_map(|play| project(play))
        .collect::<Vec<_>>();

    let mut dropped = DropReport::new();
    dropped.record("missing feature values", plays.len() - rows.len());
    log::info!("next play dataset has {} rows", rows.len());

    let data = assemble(TARGET, CONTINUOUS, CATEGORICAL, rows, schema);
    Ok(Preprocessed { data, dropped })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(play_type: &str, down: f64) -> PlayRecord {
        PlayRecord {
            game_id: "g1".to_owned(),
            season: Some(2022),
            play_type: Some(play_type.to_owned()),
            score_differential: Some(-3.0),
            game_seconds_remaining: Some(1800.0),
            half_seconds_remaining: Some(1800.0),
            yardline_100: Some(45.0),
            ydstogo: Some(10.0),
            goal_to_go: Some(0.0),
            posteam_type: Some("home".to_owned()),
            shotgun: Some(1.0),
            qtr: Some(3.0),
            down: Some(down),
            posteam_timeouts_remaining: Some(3.0),
            defteam_timeouts_remaining: Some(2.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_projects_features_in_order() {
        let table = PlayTable::from_records(vec![play("pass", 1.0), play("run", 2.0)]);
        let result = preprocess(&table, &NextPlayOptions::default(), None).unwrap();
        let data = result.data;
        assert_eq!(data.y, [PlayType::Pass, PlayType::Run]);
        assert_eq!(
            data.x.columns(),
            [
                "score_differential",
                "game_seconds_remaining",
                "half_seconds_remaining",
                "yardline_100",
                "ydstogo",
                "goal_to_go",
                "posteam_type",
                "shotgun",
                "qtr_3",
                "down_1",
                "down_2",
                "posteam_timeouts_remaining_3",
                "defteam_timeouts_remaining_2",
            ]
        );
        assert_eq!(
            data.x.rows()[1],
            [-3.0, 1800.0, 1800.0, 45.0, 10.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0]
        );
    }

    #[test]
    fn test_filters_play_types() {
        let table = PlayTable::from_records(vec![
            play("pass", 1.0),
            play("qb_kneel", 1.0),
            play("kickoff", 1.0),
            play("punt", 4.0),
        ]);
        let result = preprocess(&table, &NextPlayOptions::default(), None).unwrap();
        assert_eq!(result.data.y, [PlayType::Pass, PlayType::Punt]);

        let options = NextPlayOptions {
            play_types: vec![PlayType::QbKneel],
            ..Default::default()
        };
        let result = preprocess(&table, &options, None).unwrap();
        assert_eq!(result.data.y, [PlayType::QbKneel]);
    }

    #[test]
    fn test_drops_incomplete_rows() {
        let mut no_down = play("pass", 1.0);
        no_down.down = None;
        let mut neutral = play("run", 1.0);
        neutral.posteam_type = Some("neutral".to_owned());
        let table = PlayTable::from_records(vec![no_down, neutral, play("run", 2.0)]);
        let result = preprocess(&table, &NextPlayOptions::default(), None).unwrap();
        assert_eq!(result.data.len(), 1);
        assert_eq!(result.dropped.total(), 2);
    }

    #[test]
    fn test_away_team_and_truncation() {
        let mut away = play("pass", 2.0);
        away.posteam_type = Some("away".to_owned());
        away.score_differential = Some(-3.5);
        let table = PlayTable::from_records(vec![away]);
        let result = preprocess(&table, &NextPlayOptions::default(), None).unwrap();
        let row = &result.data.x.rows()[0];
        assert_eq!(row[0], -3.0);
        assert_eq!(row[6], 0.0);
    }

    #[test]
    fn test_encode_dataset_with_codes() {
        let table = PlayTable::from_records(vec![play("punt", 4.0), play("pass", 1.0)]);
        let options = NextPlayOptions::default();
        let result = preprocess(&table, &options, None).unwrap();
        let codes = options.codes();
        let encoded = codes.encode_dataset(&result.data);
        assert_eq!(encoded.y, [3, 0]);
        assert_eq!(encoded.x, result.data.x);
        let decoded = encoded
            .y
            .iter()
            .map(|&c| codes.play_type(c))
            .collect::<Option<Vec<_>>>();
        assert_eq!(decoded, Some(result.data.y));
    }

    #[test]
    fn test_missing_columns() {
        let table = PlayTable::new(vec!["game_id".to_owned(), "play_type".to_owned()], vec![]);
        let err = preprocess(&table, &NextPlayOptions::default(), None).unwrap_err();
        assert!(err.missing.contains(&"shotgun".to_owned()));
        assert!(!err.missing.contains(&"play_type".to_owned()));
    }
}
