//! Multinomial logistic regression.
//!
//! The reference [`Classifier`]: a linear model with one weight vector and bias
//! per class, turned into probabilities with softmax. Binary problems are the
//! two-class case of the same model.
//!
//! # Training
//!
//! ```text
//! standardize features (mean / std of the training rows)
//! repeat max_iter epochs:
//!     shuffle rows (seeded PCG generator)
//!     for each mini-batch:
//!         p = softmax(W·x + b)
//!         W -= learning_rate · (mean((p - onehot(y)) ⊗ x) + l2 · W)
//!         b -= learning_rate · mean(p - onehot(y))
//!     stop early once the epoch loss changes by less than tolerance
//! ```
//!
//! Constant columns are centered and keep unit scale.
//!
//! # Determinism
//!
//! Given the same rows, parameters and seed, fitting produces the same model.

use nflmodels_features::FeatureTable;
use nflmodels_stats::descriptive::DescriptiveStats;
use rand::{SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::classifier::{Classifier, FitError, PredictError, check_fit_input};

/// Hyperparameters of [`LogisticRegression`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogisticRegressionParams {
    /// Maximum number of passes over the training rows
    pub max_iter: usize,
    pub learning_rate: f64,
    /// L2 penalty on the weights (not the biases)
    pub l2: f64,
    pub batch_size: usize,
    /// Minimum change of the mean training loss between epochs to keep going
    pub tolerance: f64,
    /// Seed of the row shuffling generator
    pub seed: u64,
}

impl Default for LogisticRegressionParams {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            learning_rate: 0.1,
            l2: 1e-4,
            batch_size: 256,
            tolerance: 1e-6,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone)]
struct Fitted {
    means: Vec<f64>,
    scales: Vec<f64>,
    /// `weights[k][j]`: weight of feature `j` for class `k`
    weights: Vec<Vec<f64>>,
    biases: Vec<f64>,
    epochs: usize,
}

impl Fitted {
    fn standardize(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(&self.scales))
            .map(|(v, (mean, scale))| (v - mean) / scale)
            .collect()
    }

    fn probabilities(&self, standardized: &[f64]) -> Vec<f64> {
        let logits = self
            .weights
            .iter()
            .zip(&self.biases)
            .map(|(w, b)| b + dot(w, standardized))
            .collect::<Vec<_>>();
        softmax(&logits)
    }
}

/// Multinomial logistic regression fitted with mini-batch gradient descent.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    params: LogisticRegressionParams,
    fitted: Option<Fitted>,
}

impl LogisticRegression {
    #[must_use]
    pub fn new(params: LogisticRegressionParams) -> Self {
        Self {
            params,
            fitted: None,
        }
    }

    #[must_use]
    pub fn params(&self) -> &LogisticRegressionParams {
        &self.params
    }

    /// Number of epochs run by the last fit, `None` before fitting.
    #[must_use]
    pub fn epochs(&self) -> Option<usize> {
        self.fitted.as_ref().map(|f| f.epochs)
    }

    /// Weights of each class in standardized feature space.
    #[must_use]
    pub fn coefficients(&self) -> Option<&[Vec<f64>]> {
        self.fitted.as_ref().map(|f| f.weights.as_slice())
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new(LogisticRegressionParams::default())
    }
}

impl Classifier for LogisticRegression {
    #[expect(clippy::cast_precision_loss)]
    fn fit(&mut self, x: &FeatureTable, y: &[usize], n_classes: usize) -> Result<(), FitError> {
        check_fit_input(x, y, n_classes)?;
        let n_features = x.n_columns();

        let (means, scales): (Vec<_>, Vec<_>) = (0..n_features)
            .map(|j| {
                let stats = DescriptiveStats::new(x.rows().iter().map(|row| row[j]));
                stats.map_or((0.0, 1.0), |s| {
                    let scale = if s.std_dev > f64::EPSILON { s.std_dev } else { 1.0 };
                    (s.mean, scale)
                })
            })
            .unzip();
        let mut model = Fitted {
            means,
            scales,
            weights: vec![vec![0.0; n_features]; n_classes],
            biases: vec![0.0; n_classes],
            epochs: 0,
        };
        let rows = x
            .rows()
            .iter()
            .map(|row| model.standardize(row))
            .collect::<Vec<_>>();

        let params = &self.params;
        let batch_size = params.batch_size.max(1);
        let mut rng = Pcg32::seed_from_u64(params.seed);
        let mut order = (0..rows.len()).collect::<Vec<_>>();
        let mut previous_loss = f64::INFINITY;
        let mut converged = false;

        for epoch in 1..=params.max_iter {
            order.shuffle(&mut rng);
            let mut loss = 0.0;
            for batch in order.chunks(batch_size) {
                let mut grad_w = vec![vec![0.0; n_features]; n_classes];
                let mut grad_b = vec![0.0; n_classes];
                for &i in batch {
                    let p = model.probabilities(&rows[i]);
                    loss -= p[y[i]].max(f64::MIN_POSITIVE).ln();
                    for k in 0..n_classes {
                        let err = p[k] - if k == y[i] { 1.0 } else { 0.0 };
                        grad_b[k] += err;
                        for (g, v) in grad_w[k].iter_mut().zip(&rows[i]) {
                            *g += err * v;
                        }
                    }
                }
                let scale = params.learning_rate / batch.len() as f64;
                for k in 0..n_classes {
                    for (w, g) in model.weights[k].iter_mut().zip(&grad_w[k]) {
                        *w -= scale * g + params.learning_rate * params.l2 * *w;
                    }
                    model.biases[k] -= scale * grad_b[k];
                }
            }
            loss /= rows.len() as f64;
            model.epochs = epoch;
            if epoch % 100 == 0 {
                log::debug!("epoch {epoch}: loss {loss:.6}");
            }
            if (previous_loss - loss).abs() < params.tolerance {
                log::info!("converged after {epoch} epochs (loss {loss:.6})");
                converged = true;
                break;
            }
            previous_loss = loss;
        }
        if !converged {
            log::warn!(
                "stopped after max_iter = {} epochs without converging",
                params.max_iter
            );
        }

        self.fitted = Some(model);
        Ok(())
    }

    fn predict_proba(&self, x: &FeatureTable) -> Result<Vec<Vec<f64>>, PredictError> {
        let model = self.fitted.as_ref().ok_or(PredictError::NotFitted)?;
        if x.n_columns() != model.means.len() {
            return Err(PredictError::FeatureCountMismatch {
                expected: model.means.len(),
                actual: x.n_columns(),
            });
        }
        Ok(x.rows()
            .iter()
            .map(|row| model.probabilities(&model.standardize(row)))
            .collect())
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(a, b)| a * b).sum()
}

/// Numerically stable softmax.
#[must_use]
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps = logits.iter().map(|l| (l - max).exp()).collect::<Vec<_>>();
    let sum = exps.iter().sum::<f64>();
    exps.into_iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[[f64; 2]]) -> FeatureTable {
        let mut x = FeatureTable::new(vec!["a".to_owned(), "b".to_owned()]);
        for row in rows {
            x.push_row(row.to_vec());
        }
        x
    }

    fn params() -> LogisticRegressionParams {
        LogisticRegressionParams {
            max_iter: 500,
            batch_size: 4,
            ..Default::default()
        }
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let p = softmax(&[1.0, 2.0, 3.0]);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(p[2] > p[1] && p[1] > p[0]);
        // large logits do not overflow
        let p = softmax(&[1000.0, 0.0]);
        assert!((p[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_separates_binary_classes() {
        let x = table(&[
            [0.0, 1.0],
            [1.0, 0.0],
            [0.5, 0.5],
            [10.0, 9.0],
            [11.0, 10.0],
            [9.5, 10.5],
        ]);
        let y = [0, 0, 0, 1, 1, 1];
        let mut model = LogisticRegression::new(params());
        model.fit(&x, &y, 2).unwrap();
        assert_eq!(model.predict(&x).unwrap(), y);
        let p = model.predict_proba(&x).unwrap();
        assert!(p[0][0] > 0.9);
        assert!(p[4][1] > 0.9);
    }

    #[test]
    fn test_separates_three_classes() {
        let x = table(&[
            [0.0, 0.0],
            [0.2, 0.1],
            [5.0, 0.0],
            [5.1, 0.2],
            [0.0, 5.0],
            [0.1, 5.2],
        ]);
        let y = [0, 0, 1, 1, 2, 2];
        let mut model = LogisticRegression::new(params());
        model.fit(&x, &y, 3).unwrap();
        assert_eq!(model.predict(&x).unwrap(), y);
        for row in model.predict_proba(&x).unwrap() {
            assert_eq!(row.len(), 3);
            assert!((row.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_fit_is_deterministic() {
        let x = table(&[[0.0, 1.0], [1.0, 0.0], [3.0, 3.0], [4.0, 2.0], [2.0, 2.5]]);
        let y = [0, 0, 1, 1, 1];
        let mut a = LogisticRegression::new(params());
        let mut b = LogisticRegression::new(params());
        a.fit(&x, &y, 2).unwrap();
        b.fit(&x, &y, 2).unwrap();
        assert_eq!(a.coefficients(), b.coefficients());
        assert_eq!(a.epochs(), b.epochs());
    }

    #[test]
    fn test_constant_column_is_harmless() {
        let x = table(&[[1.0, 0.0], [1.0, 1.0], [1.0, 5.0], [1.0, 6.0]]);
        let y = [0, 0, 1, 1];
        let mut model = LogisticRegression::new(params());
        model.fit(&x, &y, 2).unwrap();
        let p = model.predict_proba(&x).unwrap();
        assert!(p.iter().flatten().all(|v| v.is_finite()));
        assert_eq!(model.predict(&x).unwrap(), y);
    }

    #[test]
    fn test_predict_errors() {
        let model = LogisticRegression::default();
        let x = table(&[[0.0, 0.0]]);
        assert_eq!(model.predict_proba(&x), Err(PredictError::NotFitted));

        let mut model = LogisticRegression::new(params());
        model.fit(&table(&[[0.0, 0.0], [1.0, 1.0]]), &[0, 1], 2).unwrap();
        let narrow = FeatureTable::new(vec!["a".to_owned()]);
        assert_eq!(
            model.predict_proba(&narrow),
            Err(PredictError::FeatureCountMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_unseen_class_gets_low_probability() {
        // Class 2 never appears in training; its bias only decreases
        let x = table(&[[0.0, 0.0], [1.0, 1.0], [0.1, 0.0], [0.9, 1.0]]);
        let y = [0, 1, 0, 1];
        let mut model = LogisticRegression::new(params());
        model.fit(&x, &y, 3).unwrap();
        let p = model.predict_proba(&x).unwrap();
        assert!(p.iter().all(|row| row[2] < 0.1));
    }
}
