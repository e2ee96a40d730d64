//! Expected points features
//!
//! Labels every play with the next scoring event of its game segment and
//! projects the labeled plays into two multi-class datasets:
//!
//! - `normal`: regular plays from scrimmage
//! - `pat`: extra point and two point attempts, plus plays whose label is a
//!   point-after outcome (`pat`, `2pat`, `opp_patreturn`)
//!
//! The two tables are disjoint and together hold every labeled play.
//!
//! # Pipeline
//!
//! ```text
//! plays
//!   ↓ filter seasons, sort chronologically
//!   ↓ drop plays without posteam or yardline_100
//!   ↓ immediate events → label_next_scores
//!   ↓ drop labels without a point value (data-quality defects)
//!   ↓ attach next_score_value
//!   ↓ split normal / pat
//! (Dataset<ScoringEvent>, Dataset<ScoringEvent>)
//! ```

use nflmodels_data::{MissingColumnsError, PlayRecord, PlayTable, order, table::filter_seasons};
use nflmodels_labeler::{LabelInput, ScoringEvent, label_next_scores};

use crate::{
    encoding::{OneHotSchema, category_from_number},
    table::{Dataset, DropReport, Preprocessed, ProjectedRow, assemble},
};

/// Name of the target column.
pub const TARGET: &str = "next_score";

/// Continuous feature columns, in output order.
pub const CONTINUOUS: &[&str] = &[
    "yardline_100",
    "ydstogo",
    "goal_to_go",
    "half_seconds_remaining",
    "game_seconds_remaining",
];

/// Categorical feature columns, one-hot encoded after the continuous ones.
pub const CATEGORICAL: &[&str] = &[
    "qtr",
    "down",
    "posteam_type",
    "posteam_timeouts_remaining",
    "defteam_timeouts_remaining",
];

/// Columns the labeler reads.
pub const LABEL_COLUMNS: &[&str] = &[
    "game_id",
    "play_id",
    "game_half",
    "game_seconds_remaining",
    "posteam",
    "yardline_100",
    "sp",
    "score_differential",
    "score_differential_post",
    "safety",
    "extra_point_attempt",
    "two_point_attempt",
];

/// Options of the expected points projector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedPointsOptions {
    /// Seasons to keep; empty keeps all
    pub seasons: Vec<u16>,
}

/// A play with its next scoring event.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledPlay {
    pub record: PlayRecord,
    pub next_score: ScoringEvent,
    pub next_score_value: i8,
}

impl LabeledPlay {
    /// Returns `true` if the play belongs to the point-after table.
    #[must_use]
    pub fn is_point_after(&self) -> bool {
        self.record.is_conversion_attempt() || self.next_score.is_point_after()
    }
}

/// The two expected points datasets.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedPointsData {
    pub normal: Dataset<ScoringEvent>,
    pub pat: Dataset<ScoringEvent>,
}

/// Pre-fitted schemas for the two expected points datasets.
#[derive(Debug, Clone, Copy)]
pub struct ExpectedPointsSchemas<'a> {
    pub normal: &'a OneHotSchema,
    pub pat: &'a OneHotSchema,
}

/// Sorts, filters and labels the plays of a table.
///
/// Labels are computed on the filtered, chronologically sorted plays. Plays
/// whose label has no point value are dropped and counted.
///
/// # Errors
///
/// Returns an error if a column the labeler reads (or `season`, when filtering
/// by season) is missing from the table.
pub fn label_plays(
    table: &PlayTable,
    options: &ExpectedPointsOptions,
) -> Result<Preprocessed<Vec<LabeledPlay>>, MissingColumnsError> {
    let mut required = LABEL_COLUMNS.to_vec();
    if !options.seasons.is_empty() {
        required.push("season");
    }
    table.require_columns(&required)?;
    log::info!("labeling {} rows", table.len());

    let mut dropped = DropReport::new();
    let mut plays = filter_seasons(table.records(), &options.seasons)
        .cloned()
        .collect::<Vec<_>>();
    order::sort_plays(&mut plays);

    let before = plays.len();
    plays.retain(|play| play.posteam.is_some() && play.yardline_100.is_some());
    dropped.record("missing posteam or yardline_100", before - plays.len());

    let inputs = plays
        .iter()
        .filter_map(LabelInput::from_record)
        .collect::<Vec<_>>();
    let labels = label_next_scores(&inputs);

    let mut labeled = Vec::with_capacity(plays.len());
    let mut defects = 0;
    for (record, next_score) in plays.into_iter().zip(labels) {
        match next_score.point_value() {
            Some(next_score_value) => labeled.push(LabeledPlay {
                record,
                next_score,
                next_score_value,
            }),
            None => {
                log::warn!(
                    "dropping play {:?} of game {}: label {next_score} has no point value",
                    record.play_id,
                    record.game_id
                );
                defects += 1;
            }
        }
    }
    dropped.record("label without point value", defects);
    log::info!("labeled {} rows", labeled.len());

    Ok(Preprocessed {
        data: labeled,
        dropped,
    })
}

fn project(play: &LabeledPlay) -> Option<ProjectedRow<ScoringEvent>> {
    let record = &play.record;
    let continuous = vec![
        record.yardline_100?,
        record.ydstogo?,
        record.goal_to_go?,
        record.half_seconds_remaining?,
        record.game_seconds_remaining?,
    ];
    let number = |value: Option<f64>| value.map(category_from_number);
    let categorical = vec![
        number(record.qtr),
        number(record.down),
        record.posteam_type.clone(),
        number(record.posteam_timeouts_remaining),
        number(record.defteam_timeouts_remaining),
    ];
    Some(ProjectedRow {
        continuous,
        categorical,
        target: play.next_score,
    })
}

/// Splits labeled plays into the `normal` and `pat` groups.
#[must_use]
pub fn split_point_after(plays: &[LabeledPlay]) -> (Vec<&LabeledPlay>, Vec<&LabeledPlay>) {
    plays.iter().partition(|play| !play.is_point_after())
}

/// Labels a play table and projects it into the expected points datasets.
///
/// Plays missing a continuous feature are dropped; a missing categorical value
/// sets no indicator.
///
/// # Errors
///
/// Returns an error if a column the labeler reads or a feature column is
/// missing from the table.
pub fn preprocess(
    table: &PlayTable,
    options: &ExpectedPointsOptions,
    schemas: Option<ExpectedPointsSchemas<'_>>,
) -> Result<Preprocessed<ExpectedPointsData>, MissingColumnsError> {
    let mut required = CONTINUOUS.to_vec();
    required.extend(CATEGORICAL);
    table.require_columns(&required)?;

    let Preprocessed {
        data: labeled,
        mut dropped,
    } = label_plays(table, options)?;
    let (normal, pat) = split_point_after(&labeled);
    log::info!(
        "split into {} normal and {} point-after rows",
        normal.len(),
        pat.len()
    );

    let mut build = |plays: Vec<&LabeledPlay>, schema: Option<&OneHotSchema>| {
        let rows = plays.iter().filter_map(|play| project(play)).collect::<Vec<_>>();
        dropped.record("missing feature values", plays.len() - rows.len());
        assemble(TARGET, CONTINUOUS, CATEGORICAL, rows, schema)
    };
    let normal = build(normal, schemas.map(|s| s.normal));
    let pat = build(pat, schemas.map(|s| s.pat));

    Ok(Preprocessed {
        data: ExpectedPointsData { normal, pat },
        dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(play_id: f64, seconds: f64, half: &str, posteam: &str) -> PlayRecord {
        PlayRecord {
            play_id: Some(play_id),
            game_id: "2022_01_BUF_LA".to_owned(),
            season: Some(2022),
            game_half: Some(half.to_owned()),
            posteam: Some(posteam.to_owned()),
            posteam_type: Some(if posteam == "BUF" { "away" } else { "home" }.to_owned()),
            game_seconds_remaining: Some(seconds),
            half_seconds_remaining: Some(seconds % 1800.0),
            yardline_100: Some(75.0),
            ydstogo: Some(10.0),
            goal_to_go: Some(0.0),
            qtr: Some(1.0),
            down: Some(1.0),
            posteam_timeouts_remaining: Some(3.0),
            defteam_timeouts_remaining: Some(3.0),
            sp: Some(0.0),
            score_differential: Some(0.0),
            score_differential_post: Some(0.0),
            safety: Some(0.0),
            extra_point_attempt: Some(0.0),
            two_point_attempt: Some(0.0),
            ..Default::default()
        }
    }

    fn scored(mut play: PlayRecord, points: f64) -> PlayRecord {
        play.sp = Some(1.0);
        play.score_differential_post = Some(points);
        play
    }

    fn labels(plays: &[LabeledPlay]) -> Vec<String> {
        plays.iter().map(|p| p.next_score.to_string()).collect()
    }

    #[test]
    fn test_labels_sorted_plays() {
        // Given out of order; sorting puts the touchdown last
        let table = PlayTable::from_records(vec![
            scored(play(30.0, 3000.0, "Half1", "LA"), 6.0),
            play(10.0, 3500.0, "Half1", "BUF"),
            play(20.0, 3200.0, "Half1", "LA"),
        ]);
        let result = label_plays(&table, &ExpectedPointsOptions::default()).unwrap();
        assert_eq!(labels(&result.data), ["opp_td", "td", "td"]);
        let values = result
            .data
            .iter()
            .map(|p| p.next_score_value)
            .collect::<Vec<_>>();
        assert_eq!(values, [-6, 6, 6]);
    }

    #[test]
    fn test_drops_rows_without_posteam_or_yardline() {
        let mut timeout = play(15.0, 3400.0, "Half1", "BUF");
        timeout.posteam = None;
        let mut end_of_quarter = play(16.0, 2700.0, "Half1", "BUF");
        end_of_quarter.yardline_100 = None;
        let table = PlayTable::from_records(vec![
            play(10.0, 3500.0, "Half1", "BUF"),
            timeout,
            end_of_quarter,
        ]);
        let result = label_plays(&table, &ExpectedPointsOptions::default()).unwrap();
        assert_eq!(result.data.len(), 1);
        assert_eq!(result.dropped.count("missing posteam or yardline_100"), 2);
    }

    #[test]
    fn test_drops_labels_without_point_value() {
        // LA converts the extra point; BUF's earlier play would see opp_pat
        let mut extra_point = scored(play(20.0, 3000.0, "Half1", "LA"), 1.0);
        extra_point.extra_point_attempt = Some(1.0);
        let table = PlayTable::from_records(vec![play(10.0, 3100.0, "Half1", "BUF"), extra_point]);
        let result = label_plays(&table, &ExpectedPointsOptions::default()).unwrap();
        assert_eq!(labels(&result.data), ["pat"]);
        assert_eq!(result.dropped.count("label without point value"), 1);
    }

    #[test]
    fn test_split_is_disjoint_and_complete() {
        let mut touchdown = scored(play(20.0, 3000.0, "Half1", "LA"), 6.0);
        touchdown.score_differential = Some(0.0);
        let mut extra_point = play(21.0, 3000.0, "Half1", "LA");
        extra_point.extra_point_attempt = Some(1.0);
        extra_point.score_differential = Some(6.0);
        extra_point.score_differential_post = Some(7.0);
        extra_point.sp = Some(1.0);
        let mut two_point = play(30.0, 1000.0, "Half2", "BUF");
        two_point.two_point_attempt = Some(1.0);
        let table = PlayTable::from_records(vec![
            play(10.0, 3500.0, "Half1", "LA"),
            touchdown,
            extra_point,
            play(25.0, 1500.0, "Half2", "BUF"),
            two_point,
        ]);
        let labeled = label_plays(&table, &ExpectedPointsOptions::default())
            .unwrap()
            .data;
        let (normal, pat) = split_point_after(&labeled);
        assert_eq!(normal.len() + pat.len(), labeled.len());
        assert!(normal.iter().all(|p| !p.is_point_after()));
        assert!(pat.iter().all(|p| p.is_point_after()));
        let pat_ids = pat.iter().map(|p| p.record.play_id).collect::<Vec<_>>();
        assert_eq!(pat_ids, [Some(21.0), Some(30.0)]);
    }

    #[test]
    fn test_preprocess_builds_both_tables() {
        let mut extra_point = scored(play(21.0, 3000.0, "Half1", "LA"), 1.0);
        extra_point.extra_point_attempt = Some(1.0);
        extra_point.down = None;
        let table = PlayTable::from_records(vec![
            play(10.0, 3500.0, "Half1", "LA"),
            scored(play(20.0, 3000.0, "Half1", "LA"), 6.0),
            extra_point,
        ]);
        let result = preprocess(&table, &ExpectedPointsOptions::default(), None).unwrap();
        let ExpectedPointsData { normal, pat } = result.data;
        assert_eq!(normal.len(), 2);
        assert_eq!(pat.len(), 1);
        assert_eq!(normal.x.columns()[..5], CONTINUOUS[..]);
        assert!(
            normal
                .x
                .columns()
                .contains(&"posteam_type_home".to_owned())
        );
        // The extra point has no down, so no down indicator is set
        assert!(!pat.x.columns().iter().any(|c| c.starts_with("down_")));
    }

    #[test]
    fn test_preprocess_with_schemas() {
        let table = PlayTable::from_records(vec![play(10.0, 3500.0, "Half1", "LA")]);
        let schema = OneHotSchema::fit(CATEGORICAL, &[vec![None::<String>; 5]]);
        let schemas = ExpectedPointsSchemas {
            normal: &schema,
            pat: &schema,
        };
        let result = preprocess(&table, &ExpectedPointsOptions::default(), Some(schemas)).unwrap();
        assert_eq!(result.data.normal.x.n_columns(), CONTINUOUS.len());
    }

    #[test]
    fn test_season_filter() {
        let mut old = play(10.0, 3500.0, "Half1", "LA");
        old.season = Some(2020);
        let table = PlayTable::from_records(vec![old, play(20.0, 3400.0, "Half1", "LA")]);
        let options = ExpectedPointsOptions {
            seasons: vec![2022],
        };
        let result = label_plays(&table, &options).unwrap();
        assert_eq!(result.data.len(), 1);
        assert_eq!(result.data[0].record.play_id, Some(20.0));
    }
}
