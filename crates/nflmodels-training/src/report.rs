//! Evaluation report of a training run.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use nflmodels_features::DropReport;
use serde::Serialize;

use crate::{
    logistic::LogisticRegressionParams,
    model::{EvaluationMetrics, Task},
};

/// Everything worth keeping from one `fit` + `predict_and_score` run.
///
/// Models themselves are not persisted; the report is the only artifact.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub task: Task,
    pub trained_at: DateTime<Utc>,
    pub train_rows: usize,
    pub validation_rows: usize,
    pub features: Vec<String>,
    pub classes: Vec<String>,
    pub params: LogisticRegressionParams,
    /// Epochs actually run before convergence or `max_iter`
    pub epochs: Option<usize>,
    /// Rows dropped during preprocessing, by reason
    pub dropped_rows: BTreeMap<String, usize>,
    pub metrics: EvaluationMetrics,
}

impl EvaluationReport {
    #[must_use]
    pub fn dropped_rows(dropped: &DropReport) -> BTreeMap<String, usize> {
        dropped
            .iter()
            .map(|(reason, count)| (reason.to_owned(), count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_json_shape() {
        let mut dropped = DropReport::new();
        dropped.record("missing wind", 3);
        let report = EvaluationReport {
            task: Task::FieldGoal,
            trained_at: Utc::now(),
            train_rows: 80,
            validation_rows: 20,
            features: vec!["yardline_100".to_owned()],
            classes: vec!["0".to_owned(), "1".to_owned()],
            params: Task::FieldGoal.default_params(),
            epochs: Some(12),
            dropped_rows: EvaluationReport::dropped_rows(&dropped),
            metrics: EvaluationMetrics::default(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["task"], "fieldgoal");
        assert_eq!(json["params"]["max_iter"], 1000);
        assert_eq!(json["dropped_rows"]["missing wind"], 3);
        assert!(json["trained_at"].is_string());
    }
}
