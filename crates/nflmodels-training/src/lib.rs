//! Model fitting and evaluation for the nflmodels tasks.
//!
//! This crate wraps a trainable classifier behind the two calls the tasks need
//! and turns its validation output into metrics, reports and diagnostics.
//!
//! # Architecture
//!
//! ```text
//! Dataset (nflmodels-features)
//!     ↓ class codes
//! ClassTargets
//!     ↓ fit / predict_and_score
//! ModelAdapter ── Classifier (LogisticRegression)
//!     ↓ scored by
//! EvaluationMetrics (nflmodels-stats)
//!     ↓ summarized in
//! EvaluationReport, FieldGoalDiagnostics
//! ```
//!
//! # Modules
//!
//! - [`classifier`]: the [`Classifier`] trait and its errors
//! - [`logistic`]: multinomial logistic regression, the reference classifier
//! - [`targets`]: class code assignment for categorical targets
//! - [`model`]: tasks, the [`ModelAdapter`] and validation metrics
//! - [`report`]: the serializable [`EvaluationReport`]
//! - [`diagnostics`]: field-goal ROC, calibration and distance tables
//!
//! # Task defaults
//!
//! | task            | classifier          | `max_iter` |
//! |-----------------|---------------------|------------|
//! | field goal      | logistic regression | 1000       |
//! | next play       | logistic regression | 1000       |
//! | expected points | logistic regression | 10000      |
//!
//! # Example
//!
//! ```
//! use nflmodels_features::FeatureTable;
//! use nflmodels_training::Task;
//!
//! let mut x = FeatureTable::new(vec!["yardline_100".to_owned()]);
//! let mut y = vec![];
//! for yards in [5.0, 12.0, 20.0, 28.0, 41.0, 47.0, 52.0, 58.0] {
//!     x.push_row(vec![yards]);
//!     y.push(usize::from(yards < 35.0));
//! }
//!
//! let mut model = Task::FieldGoal.default_model(vec!["0".to_owned(), "1".to_owned()]);
//! model.fit(&x, &y)?;
//! let scored = model.predict_and_score(&x, &y)?;
//! assert_eq!(scored.predictions, y);
//! assert_eq!(scored.metrics.roc_auc, Some(1.0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    classifier::{Classifier, FitError, PredictError},
    diagnostics::FieldGoalDiagnostics,
    logistic::{LogisticRegression, LogisticRegressionParams},
    model::{EvaluationMetrics, ModelAdapter, ScoredPredictions, Task},
    report::EvaluationReport,
    targets::ClassTargets,
};

pub mod classifier;
pub mod diagnostics;
pub mod logistic;
pub mod model;
pub mod report;
pub mod targets;
