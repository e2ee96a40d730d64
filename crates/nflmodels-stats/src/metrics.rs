//! Classification metrics
//!
//! All functions take class codes (`0..n_classes`) and per-row probability
//! vectors indexed by class code, and return `None` when the metric is undefined
//! for the input (empty input, mismatched lengths, or a single class where two
//! are required).
//!
//! | metric                       | function                 |
//! |------------------------------|--------------------------|
//! | binary ROC AUC               | [`roc_auc`]              |
//! | weighted one-vs-one ROC AUC  | [`roc_auc_ovo_weighted`] |
//! | log loss (cross-entropy)     | [`log_loss`]             |
//! | mean squared error           | [`mean_squared_error`]   |
//! | support-weighted F1          | [`f1_weighted`]          |
//! | accuracy                     | [`accuracy`]             |

use std::collections::BTreeSet;

/// Probabilities are clipped to `[EPSILON, 1 - EPSILON]` before taking logs.
pub const LOG_LOSS_EPSILON: f64 = 1e-15;

/// Area under the ROC curve of a binary problem.
///
/// Computed from the Mann-Whitney rank statistic, with tied scores sharing
/// their average rank.
///
/// # Examples
///
/// ```
/// use nflmodels_stats::metrics::roc_auc;
///
/// let labels = [false, false, true, true];
/// let scores = [0.1, 0.4, 0.35, 0.8];
/// assert_eq!(roc_auc(&labels, &scores), Some(0.75));
/// assert_eq!(roc_auc(&[true, true], &[0.2, 0.9]), None);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn roc_auc(labels: &[bool], scores: &[f64]) -> Option<f64> {
    if labels.len() != scores.len() {
        return None;
    }
    let n_pos = labels.iter().filter(|&&l| l).count();
    let n_neg = labels.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return None;
    }

    let ranks = average_ranks(scores);
    let pos_rank_sum = labels
        .iter()
        .zip(&ranks)
        .filter(|&(&l, _)| l)
        .map(|(_, r)| r)
        .sum::<f64>();
    let n_pos = n_pos as f64;
    let n_neg = n_neg as f64;
    Some((pos_rank_sum - n_pos * (n_pos + 1.0) / 2.0) / (n_pos * n_neg))
}

/// 1-based ranks of `values`, ties replaced by their average rank.
#[expect(clippy::cast_precision_loss)]
fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order = (0..values.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]].total_cmp(&values[order[start]]).is_eq() {
            end += 1;
        }
        // positions start..end hold ranks start+1..=end
        let rank = (start + 1 + end) as f64 / 2.0;
        for &i in &order[start..end] {
            ranks[i] = rank;
        }
        start = end;
    }
    ranks
}

/// Multi-class ROC AUC, averaged over every pair of classes and weighted by the
/// share of rows belonging to the pair.
///
/// For a pair `(a, b)` only rows of class `a` or `b` are considered and the
/// score is the mean of "`a` vs `b`" (scored by the probability of `a`) and
/// "`b` vs `a`" (scored by the probability of `b`).
///
/// Classes absent from `labels` are ignored.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn roc_auc_ovo_weighted(labels: &[usize], probabilities: &[Vec<f64>]) -> Option<f64> {
    if labels.len() != probabilities.len() || labels.is_empty() {
        return None;
    }
    let classes = labels.iter().copied().collect::<BTreeSet<_>>();
    let max_class = *classes.last()?;
    if classes.len() < 2 || probabilities.iter().any(|p| p.len() <= max_class) {
        return None;
    }

    let total = labels.len() as f64;
    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;
    for (i, &a) in classes.iter().enumerate() {
        for &b in classes.iter().skip(i + 1) {
            let rows = (0..labels.len())
                .filter(|&r| labels[r] == a || labels[r] == b)
                .collect::<Vec<_>>();
            let pair_auc = |positive: usize| {
                let is_positive = rows.iter().map(|&r| labels[r] == positive).collect::<Vec<_>>();
                let scores = rows
                    .iter()
                    .map(|&r| probabilities[r][positive])
                    .collect::<Vec<_>>();
                roc_auc(&is_positive, &scores)
            };
            let score = f64::midpoint(pair_auc(a)?, pair_auc(b)?);
            let weight = rows.len() as f64 / total;
            weighted_sum += score * weight;
            weight_sum += weight;
        }
    }
    Some(weighted_sum / weight_sum)
}

/// Mean negative log-likelihood of the true classes.
///
/// Each probability row is clipped to `[LOG_LOSS_EPSILON, 1 - LOG_LOSS_EPSILON]`
/// and renormalized before use.
///
/// # Examples
///
/// ```
/// use nflmodels_stats::metrics::log_loss;
///
/// let loss = log_loss(&[1, 0], &[vec![0.2, 0.8], vec![0.6, 0.4]]).unwrap();
/// let expected = -(0.8_f64.ln() + 0.6_f64.ln()) / 2.0;
/// assert!((loss - expected).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn log_loss(labels: &[usize], probabilities: &[Vec<f64>]) -> Option<f64> {
    if labels.len() != probabilities.len() || labels.is_empty() {
        return None;
    }
    let mut total = 0.0;
    for (&label, row) in labels.iter().zip(probabilities) {
        let clip = |p: f64| p.clamp(LOG_LOSS_EPSILON, 1.0 - LOG_LOSS_EPSILON);
        let norm = row.iter().map(|&p| clip(p)).sum::<f64>();
        let p = clip(*row.get(label)?) / norm;
        total -= p.ln();
    }
    Some(total / labels.len() as f64)
}

/// Mean of squared differences between two equally long sequences.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> Option<f64> {
    if actual.len() != predicted.len() || actual.is_empty() {
        return None;
    }
    let sum = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>();
    Some(sum / actual.len() as f64)
}

/// F1 score per class, averaged with weights equal to each class's support
/// (number of rows truly in that class).
///
/// A class with no predicted or no true rows has an F1 of `0`.
///
/// # Examples
///
/// ```
/// use nflmodels_stats::metrics::f1_weighted;
///
/// assert_eq!(f1_weighted(&[0, 1, 1, 2], &[0, 1, 1, 2]), Some(1.0));
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn f1_weighted(actual: &[usize], predicted: &[usize]) -> Option<f64> {
    if actual.len() != predicted.len() || actual.is_empty() {
        return None;
    }
    let classes = actual
        .iter()
        .chain(predicted)
        .copied()
        .collect::<BTreeSet<_>>();
    let mut weighted = 0.0;
    for class in classes {
        let mut true_positive = 0_u32;
        let mut false_positive = 0_u32;
        let mut false_negative = 0_u32;
        for (&a, &p) in actual.iter().zip(predicted) {
            match (a == class, p == class) {
                (true, true) => true_positive += 1,
                (false, true) => false_positive += 1,
                (true, false) => false_negative += 1,
                (false, false) => {}
            }
        }
        let support = true_positive + false_negative;
        let denominator = 2 * true_positive + false_positive + false_negative;
        if support == 0 || denominator == 0 {
            continue;
        }
        let f1 = f64::from(2 * true_positive) / f64::from(denominator);
        weighted += f1 * f64::from(support);
    }
    Some(weighted / actual.len() as f64)
}

/// Share of rows whose predicted class equals the true class.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn accuracy(actual: &[usize], predicted: &[usize]) -> Option<f64> {
    if actual.len() != predicted.len() || actual.is_empty() {
        return None;
    }
    let correct = actual.iter().zip(predicted).filter(|(a, p)| a == p).count();
    Some(correct as f64 / actual.len() as f64)
}
