//! Model adapter
//!
//! [`ModelAdapter`] wraps a [`Classifier`] for one [`Task`] behind two calls:
//!
//! - [`fit`](ModelAdapter::fit): train on `(x, y)`
//! - [`predict_and_score`](ModelAdapter::predict_and_score): predict classes and
//!   probabilities for validation rows and score them against the true classes
//!
//! Metrics depend on the shape of the task:
//!
//! | task            | ROC AUC                 | F1       | MSE | log loss |
//! |-----------------|-------------------------|----------|-----|----------|
//! | field goal      | binary                  | -        | yes | yes      |
//! | next play       | weighted one-vs-one     | weighted | yes | yes      |
//! | expected points | weighted one-vs-one     | weighted | yes | yes      |
//!
//! MSE is taken over class codes.
//!
//! Printing the metrics is the only side effect; inputs are never mutated.

use std::fmt;

use nflmodels_features::FeatureTable;
use nflmodels_stats::metrics;
use serde::Serialize;

use crate::{
    classifier::{Classifier, FitError, PredictError},
    logistic::{LogisticRegression, LogisticRegressionParams},
};

/// The three prediction tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::FromStr)]
pub enum Task {
    /// Field goal and extra point success
    FieldGoal,
    /// Offensive play type selection
    NextPlay,
    /// Next scoring event of the game half
    ExpectedPoints,
}

impl Task {
    pub const ALL: [Task; 3] = [Task::FieldGoal, Task::NextPlay, Task::ExpectedPoints];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Task::FieldGoal => "fieldgoal",
            Task::NextPlay => "nextplay",
            Task::ExpectedPoints => "expectedpoints",
        }
    }

    /// Whether the weighted F1 score is reported for this task.
    #[must_use]
    pub fn reports_f1(self) -> bool {
        !matches!(self, Task::FieldGoal)
    }

    /// Default classifier parameters of the task.
    #[must_use]
    pub fn default_params(self) -> LogisticRegressionParams {
        let max_iter = match self {
            Task::FieldGoal | Task::NextPlay => 1000,
            Task::ExpectedPoints => 10_000,
        };
        LogisticRegressionParams {
            max_iter,
            ..Default::default()
        }
    }

    /// The default model of the task: logistic regression with
    /// [`default_params`](Self::default_params).
    #[must_use]
    pub fn default_model(self, class_names: Vec<String>) -> ModelAdapter<LogisticRegression> {
        ModelAdapter::new(
            self,
            LogisticRegression::new(self.default_params()),
            class_names,
        )
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl Serialize for Task {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Validation metrics of a fitted model.
///
/// A metric is `None` when it is not reported for the task or is undefined for
/// the validation rows (for example ROC AUC with a single class present).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvaluationMetrics {
    pub roc_auc: Option<f64>,
    pub f1_weighted: Option<f64>,
    pub mse: Option<f64>,
    pub log_loss: Option<f64>,
    pub accuracy: Option<f64>,
}

impl EvaluationMetrics {
    /// Scores predictions of a task against the true class codes.
    #[must_use]
    pub fn compute(
        task: Task,
        actual: &[usize],
        predicted: &[usize],
        probabilities: &[Vec<f64>],
    ) -> Self {
        let n_classes = probabilities.first().map_or(0, Vec::len);
        let roc_auc = if n_classes == 2 {
            let positive = actual.iter().map(|&c| c == 1).collect::<Vec<_>>();
            let scores = probabilities.iter().map(|p| p[1]).collect::<Vec<_>>();
            metrics::roc_auc(&positive, &scores)
        } else {
            metrics::roc_auc_ovo_weighted(actual, probabilities)
        };
        let as_f64 = |codes: &[usize]| {
            codes
                .iter()
                .map(|&c| f64::from(u32::try_from(c).unwrap_or(u32::MAX)))
                .collect::<Vec<_>>()
        };
        Self {
            roc_auc,
            f1_weighted: task
                .reports_f1()
                .then(|| metrics::f1_weighted(actual, predicted))
                .flatten(),
            mse: metrics::mean_squared_error(&as_f64(actual), &as_f64(predicted)),
            log_loss: metrics::log_loss(actual, probabilities),
            accuracy: metrics::accuracy(actual, predicted),
        }
    }

    /// Prints the metrics to stderr.
    pub fn print(&self) {
        let show = |name: &str, value: Option<f64>| match value {
            Some(value) => eprintln!("  {name:<9} {value:.3}"),
            None => eprintln!("  {name:<9} n/a"),
        };
        eprintln!("On validation set");
        show("ROC AUC:", self.roc_auc);
        if self.f1_weighted.is_some() {
            show("F1 score:", self.f1_weighted);
        }
        show("MSE:", self.mse);
        show("Log loss:", self.log_loss);
        show("Accuracy:", self.accuracy);
    }
}

/// Predictions for a set of validation rows, with their scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPredictions {
    pub predictions: Vec<usize>,
    pub probabilities: Vec<Vec<f64>>,
    pub metrics: EvaluationMetrics,
}

/// A classifier bound to a task and its class names.
#[derive(Debug, Clone)]
pub struct ModelAdapter<C> {
    task: Task,
    classifier: C,
    class_names: Vec<String>,
    print_metrics: bool,
}

impl<C> ModelAdapter<C>
where
    C: Classifier,
{
    /// Creates an adapter; class code `k` is named `class_names[k]`.
    #[must_use]
    pub fn new(task: Task, classifier: C, class_names: Vec<String>) -> Self {
        Self {
            task,
            classifier,
            class_names,
            print_metrics: false,
        }
    }

    /// Prints the metrics of every [`predict_and_score`](Self::predict_and_score) call.
    #[must_use]
    pub fn with_print_metrics(mut self, print_metrics: bool) -> Self {
        self.print_metrics = print_metrics;
        self
    }

    #[must_use]
    pub fn task(&self) -> Task {
        self.task
    }

    #[must_use]
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    #[must_use]
    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    pub fn fit(&mut self, x: &FeatureTable, y: &[usize]) -> Result<(), FitError> {
        log::info!(
            "fitting {} model on {} rows, {} features, {} classes",
            self.task,
            x.n_rows(),
            x.n_columns(),
            self.class_names.len()
        );
        self.classifier.fit(x, y, self.class_names.len())
    }

    /// Predicts validation rows and scores them against the true class codes.
    pub fn predict_and_score(
        &self,
        x: &FeatureTable,
        y: &[usize],
    ) -> Result<ScoredPredictions, PredictError> {
        let probabilities = self.classifier.predict_proba(x)?;
        let predictions = probabilities
            .iter()
            .map(|p| crate::classifier::argmax(p))
            .collect::<Vec<_>>();
        let metrics = EvaluationMetrics::compute(self.task, y, &predictions, &probabilities);
        if self.print_metrics {
            metrics.print();
        }
        Ok(ScoredPredictions {
            predictions,
            probabilities,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable() -> (FeatureTable, Vec<usize>) {
        let mut x = FeatureTable::new(vec!["yardline_100".to_owned()]);
        let mut y = vec![];
        for i in 0..20 {
            let yards = f64::from(i) * 3.0;
            x.push_row(vec![yards]);
            y.push(usize::from(yards < 30.0));
        }
        (x, y)
    }

    #[test]
    fn test_task_from_str() {
        assert_eq!("FieldGoal".parse::<Task>().ok(), Some(Task::FieldGoal));
        for task in Task::ALL {
            assert_eq!(task.as_str().parse::<Task>().ok(), Some(task));
        }
        assert!("passing".parse::<Task>().is_err());
    }

    #[test]
    fn test_task_defaults() {
        assert_eq!(Task::FieldGoal.default_params().max_iter, 1000);
        assert_eq!(Task::ExpectedPoints.default_params().max_iter, 10_000);
        assert!(!Task::FieldGoal.reports_f1());
        assert!(Task::NextPlay.reports_f1());
    }

    #[test]
    fn test_fit_and_score_binary() {
        let (x, y) = separable();
        let mut model = Task::FieldGoal.default_model(vec!["0".to_owned(), "1".to_owned()]);
        model.fit(&x, &y).unwrap();
        let scored = model.predict_and_score(&x, &y).unwrap();
        assert_eq!(scored.predictions, y);
        assert_eq!(scored.probabilities.len(), y.len());
        assert_eq!(scored.metrics.roc_auc, Some(1.0));
        assert_eq!(scored.metrics.mse, Some(0.0));
        assert_eq!(scored.metrics.f1_weighted, None);
        assert!(scored.metrics.log_loss.unwrap() < 0.3);
    }

    #[test]
    fn test_metrics_multiclass() {
        let actual = [0, 1, 2, 2];
        let predicted = [0, 1, 2, 1];
        let probabilities = vec![
            vec![0.8, 0.1, 0.1],
            vec![0.1, 0.8, 0.1],
            vec![0.1, 0.1, 0.8],
            vec![0.1, 0.5, 0.4],
        ];
        let metrics = EvaluationMetrics::compute(Task::NextPlay, &actual, &predicted, &probabilities);
        assert!(metrics.roc_auc.is_some());
        assert!(metrics.f1_weighted.is_some());
        assert_eq!(metrics.mse, Some(0.25));
        assert_eq!(metrics.accuracy, Some(0.75));
    }

    #[test]
    fn test_metrics_serialize() {
        let metrics = EvaluationMetrics {
            roc_auc: Some(0.5),
            ..Default::default()
        };
        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["roc_auc"], 0.5);
        assert!(json["f1_weighted"].is_null());
        assert_eq!(serde_json::to_value(Task::NextPlay).unwrap(), "nextplay");
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let (x, y) = separable();
        let model = Task::FieldGoal.default_model(vec!["0".to_owned(), "1".to_owned()]);
        assert_eq!(
            model.predict_and_score(&x, &y).unwrap_err(),
            PredictError::NotFitted
        );
    }
}
