//! Validation diagnostics
//!
//! Tabular views of a fitted model's validation output, ready to be written as
//! CSV and plotted elsewhere. Only the field-goal task has diagnostics:
//!
//! - ROC curve of the success probability
//! - calibration table: predicted success chance against the observed share of
//!   successful kicks, in [`CALIBRATION_BINS`] equal-width bins
//! - mean predicted success chance by distance to the end zone
//!   (`yardline_100` in `0..=60`), split by the `closed` roof indicator when the
//!   feature table has one
//!
//! The next-play and expected-points tasks produce nothing.

use std::collections::BTreeMap;

use nflmodels_features::FeatureTable;
use nflmodels_stats::curve::{self, CalibrationTable, RocPoint};
use serde::Serialize;

use crate::model::Task;

pub const CALIBRATION_BINS: usize = 12;
pub const MAX_DISTANCE: u32 = 60;

/// One row of [`FieldGoalDiagnostics::roc_rows`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RocRow {
    pub threshold: f64,
    pub false_positive_rate: f64,
    pub true_positive_rate: f64,
}

/// One row of [`FieldGoalDiagnostics::calibration_rows`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationRow {
    pub bin_start: f64,
    pub bin_end: f64,
    pub attempts: u64,
    pub successes: u64,
    pub mean_predicted: Option<f64>,
    pub observed_rate: Option<f64>,
}

/// Mean predicted success chance of the validation kicks at one distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceSuccess {
    pub yardline_100: u32,
    /// `None` when the model was trained without the roof feature
    pub closed: Option<bool>,
    pub attempts: usize,
    pub mean_predicted: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldGoalDiagnostics {
    pub roc: Vec<RocPoint>,
    pub calibration: CalibrationTable,
    pub success_by_distance: Vec<DistanceSuccess>,
}

impl FieldGoalDiagnostics {
    /// Computes the diagnostics from validation features, true results and
    /// class probabilities (column 1 is the success probability).
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn new(x_val: &FeatureTable, y_val: &[usize], probabilities: &[Vec<f64>]) -> Self {
        let made = y_val.iter().map(|&y| y == 1).collect::<Vec<_>>();
        let success = probabilities
            .iter()
            .map(|p| p.get(1).copied().unwrap_or(0.0))
            .collect::<Vec<_>>();

        let yardlines = x_val.column_values("yardline_100").unwrap_or_default();
        let closed = x_val.column_values("closed");
        let mut groups = BTreeMap::<(u32, Option<bool>), (usize, f64)>::new();
        for (i, (&yardline, &p)) in yardlines.iter().zip(&success).enumerate() {
            if !(0.0..=f64::from(MAX_DISTANCE)).contains(&yardline) {
                continue;
            }
            let key = (
                yardline.round() as u32,
                closed.as_ref().map(|c| c[i] > 0.5),
            );
            let entry = groups.entry(key).or_default();
            entry.0 += 1;
            entry.1 += p;
        }
        let success_by_distance = groups
            .into_iter()
            .map(|((yardline_100, closed), (attempts, sum))| DistanceSuccess {
                yardline_100,
                closed,
                attempts,
                mean_predicted: sum / attempts as f64,
            })
            .collect();

        Self {
            roc: curve::roc_curve(&made, &success),
            calibration: CalibrationTable::new(&made, &success, CALIBRATION_BINS),
            success_by_distance,
        }
    }

    #[must_use]
    pub fn roc_rows(&self) -> Vec<RocRow> {
        self.roc
            .iter()
            .map(|p| RocRow {
                threshold: p.threshold,
                false_positive_rate: p.false_positive_rate,
                true_positive_rate: p.true_positive_rate,
            })
            .collect()
    }

    #[must_use]
    pub fn calibration_rows(&self) -> Vec<CalibrationRow> {
        self.calibration
            .bins
            .iter()
            .map(|bin| CalibrationRow {
                bin_start: bin.range.start,
                bin_end: bin.range.end,
                attempts: bin.count,
                successes: bin.positives,
                mean_predicted: bin.mean_predicted,
                observed_rate: bin.observed_rate(),
            })
            .collect()
    }
}

/// Diagnostics of a task's validation output, if the task has any.
#[must_use]
pub fn diagnose(
    task: Task,
    x_val: &FeatureTable,
    y_val: &[usize],
    probabilities: &[Vec<f64>],
) -> Option<FieldGoalDiagnostics> {
    match task {
        Task::FieldGoal => Some(FieldGoalDiagnostics::new(x_val, y_val, probabilities)),
        Task::NextPlay | Task::ExpectedPoints => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation() -> (FeatureTable, Vec<usize>, Vec<Vec<f64>>) {
        let mut x = FeatureTable::new(vec![
            "yardline_100".to_owned(),
            "closed".to_owned(),
            "wind".to_owned(),
        ]);
        x.push_row(vec![10.0, 0.0, 5.0]);
        x.push_row(vec![10.0, 0.0, 0.0]);
        x.push_row(vec![10.0, 1.0, 0.0]);
        x.push_row(vec![45.0, 0.0, 12.0]);
        x.push_row(vec![75.0, 0.0, 3.0]);
        let y = vec![1, 1, 1, 0, 0];
        let p = [0.9, 0.7, 0.95, 0.4, 0.1]
            .iter()
            .map(|&s| vec![1.0 - s, s])
            .collect();
        (x, y, p)
    }

    #[test]
    fn test_success_by_distance_groups_by_roof() {
        let (x, y, p) = validation();
        let diagnostics = FieldGoalDiagnostics::new(&x, &y, &p);
        let rows = &diagnostics.success_by_distance;
        // 75 yards is outside the plotted range
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].yardline_100, 10);
        assert_eq!(rows[0].closed, Some(false));
        assert_eq!(rows[0].attempts, 2);
        assert!((rows[0].mean_predicted - 0.8).abs() < 1e-12);
        assert_eq!(rows[1].closed, Some(true));
        assert_eq!(rows[2].yardline_100, 45);
    }

    #[test]
    fn test_without_roof_column() {
        let mut x = FeatureTable::new(vec!["yardline_100".to_owned()]);
        x.push_row(vec![20.0]);
        x.push_row(vec![20.0]);
        let diagnostics = FieldGoalDiagnostics::new(&x, &[1, 0], &[vec![0.3, 0.7], vec![0.5, 0.5]]);
        assert_eq!(diagnostics.success_by_distance.len(), 1);
        assert_eq!(diagnostics.success_by_distance[0].closed, None);
    }

    #[test]
    fn test_curves() {
        let (x, y, p) = validation();
        let diagnostics = FieldGoalDiagnostics::new(&x, &y, &p);
        let roc = diagnostics.roc_rows();
        assert_eq!(roc.first().map(|r| r.true_positive_rate), Some(0.0));
        assert_eq!(roc.last().map(|r| r.false_positive_rate), Some(1.0));

        let calibration = diagnostics.calibration_rows();
        assert_eq!(calibration.len(), CALIBRATION_BINS);
        assert_eq!(calibration.iter().map(|r| r.attempts).sum::<u64>(), 5);
        assert_eq!(calibration.iter().map(|r| r.successes).sum::<u64>(), 3);
    }

    #[test]
    fn test_other_tasks_have_no_diagnostics() {
        let (x, y, p) = validation();
        assert!(diagnose(Task::NextPlay, &x, &y, &p).is_none());
        assert!(diagnose(Task::ExpectedPoints, &x, &y, &p).is_none());
        assert!(diagnose(Task::FieldGoal, &x, &y, &p).is_some());
    }
}
