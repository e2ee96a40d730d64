//! Statistical utilities for evaluating nflmodels classifiers.
//!
//! This crate provides:
//!
//! - **Descriptive statistics**: mean, median, variance, standard deviation
//! - **Classification metrics**: ROC AUC (binary and weighted one-vs-one), log
//!   loss, mean squared error, weighted F1, accuracy
//! - **Curves**: ROC curve points and probability calibration tables
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`metrics`]: Scalar metrics over class codes and probabilities
//! - [`curve`]: ROC curves and calibration tables for binary classifiers
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use nflmodels_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Scoring a binary classifier
//!
//! ```
//! use nflmodels_stats::metrics;
//!
//! let labels = [0, 1, 1, 0];
//! let probabilities = vec![
//!     vec![0.8, 0.2],
//!     vec![0.3, 0.7],
//!     vec![0.1, 0.9],
//!     vec![0.6, 0.4],
//! ];
//! let positive = labels.map(|l| l == 1);
//! let scores = probabilities.iter().map(|p| p[1]).collect::<Vec<_>>();
//! assert_eq!(metrics::roc_auc(&positive, &scores), Some(1.0));
//! assert!(metrics::log_loss(&labels, &probabilities).unwrap() < 0.5);
//! ```

pub mod curve;
pub mod descriptive;
pub mod metrics;
