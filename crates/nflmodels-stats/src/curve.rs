//! ROC curves and probability calibration tables
//!
//! Both are tabular views of a binary classifier's validation output, meant to
//! be written to CSV and plotted elsewhere.

use std::ops::Range;

/// One point of a ROC curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RocPoint {
    /// Scores at or above this value are predicted positive
    pub threshold: f64,
    pub false_positive_rate: f64,
    pub true_positive_rate: f64,
}

/// Computes the ROC curve of binary scores.
///
/// The curve starts at `(0, 0)` with an infinite threshold and gains one point
/// per distinct score, in decreasing score order, ending at `(1, 1)`.
///
/// Returns an empty curve unless both classes are present.
///
/// # Examples
///
/// ```
/// use nflmodels_stats::curve::roc_curve;
///
/// let curve = roc_curve(&[false, true, true], &[0.2, 0.7, 0.9]);
/// let points = curve
///     .iter()
///     .map(|p| (p.false_positive_rate, p.true_positive_rate))
///     .collect::<Vec<_>>();
/// assert_eq!(points, [(0.0, 0.0), (0.0, 0.5), (0.0, 1.0), (1.0, 1.0)]);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn roc_curve(labels: &[bool], scores: &[f64]) -> Vec<RocPoint> {
    let n_pos = labels.iter().filter(|&&l| l).count();
    let n_neg = labels.len() - n_pos;
    if labels.len() != scores.len() || n_pos == 0 || n_neg == 0 {
        return vec![];
    }

    let mut order = (0..scores.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut points = vec![RocPoint {
        threshold: f64::INFINITY,
        false_positive_rate: 0.0,
        true_positive_rate: 0.0,
    }];
    let (mut tp, mut fp) = (0_usize, 0_usize);
    for (i, &idx) in order.iter().enumerate() {
        if labels[idx] {
            tp += 1;
        } else {
            fp += 1;
        }
        let is_last_of_score = order
            .get(i + 1)
            .is_none_or(|&next| scores[next].total_cmp(&scores[idx]).is_ne());
        if is_last_of_score {
            points.push(RocPoint {
                threshold: scores[idx],
                false_positive_rate: fp as f64 / n_neg as f64,
                true_positive_rate: tp as f64 / n_pos as f64,
            });
        }
    }
    points
}

/// A range of predicted probabilities and the outcomes observed in it.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationBin {
    /// The range of predicted probabilities covered by this bin (inclusive start,
    /// exclusive end).
    pub range: Range<f64>,
    /// Number of predictions in the bin.
    pub count: u64,
    /// Number of those predictions whose true outcome was positive.
    pub positives: u64,
    /// Mean predicted probability of the bin, `None` if empty.
    pub mean_predicted: Option<f64>,
}

impl CalibrationBin {
    /// Share of positive outcomes in the bin, `None` if empty.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn observed_rate(&self) -> Option<f64> {
        (self.count > 0).then(|| self.positives as f64 / self.count as f64)
    }
}

/// Predicted probability against observed outcome frequency.
///
/// A well calibrated classifier has `observed_rate ≈ mean_predicted` in every
/// non-empty bin.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationTable {
    pub bins: Vec<CalibrationBin>,
}

impl CalibrationTable {
    /// Bins predictions into `num_bins` equal-width bins spanning the observed
    /// range of predicted probabilities.
    ///
    /// # Examples
    ///
    /// ```
    /// use nflmodels_stats::curve::CalibrationTable;
    ///
    /// let labels = [false, true, true, true];
    /// let predicted = [0.2, 0.4, 0.8, 1.0];
    /// let table = CalibrationTable::new(&labels, &predicted, 2);
    /// assert_eq!(table.bins.len(), 2);
    /// assert_eq!(table.bins[0].count, 2);
    /// assert_eq!(table.bins[0].observed_rate(), Some(0.5));
    /// assert_eq!(table.bins[1].observed_rate(), Some(1.0));
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn new(labels: &[bool], predicted: &[f64], num_bins: usize) -> Self {
        if labels.len() != predicted.len() || predicted.is_empty() || num_bins == 0 {
            return Self { bins: vec![] };
        }

        let min = predicted.iter().copied().fold(f64::INFINITY, f64::min);
        let max = predicted.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut range = max - min;
        if range < f64::EPSILON {
            // all predictions equal; give the bins a unit width
            range = 1.0;
        }
        let bin_width = range / num_bins as f64;

        let mut sums = vec![0.0; num_bins];
        let mut bins = (0..num_bins)
            .map(|i| {
                // Recompute boundaries from the index to avoid accumulation error
                let start = min + i as f64 * range / num_bins as f64;
                let mut end = min + (i + 1) as f64 * range / num_bins as f64;
                if i == num_bins - 1 {
                    end = end.max(max).next_up();
                }
                CalibrationBin {
                    range: start..end,
                    count: 0,
                    positives: 0,
                    mean_predicted: None,
                }
            })
            .collect::<Vec<_>>();

        for (&label, &p) in labels.iter().zip(predicted) {
            let idx = (((p - min) / bin_width).floor() as usize).min(num_bins - 1);
            let bin = &mut bins[idx];
            bin.count += 1;
            bin.positives += u64::from(label);
            sums[idx] += p;
        }
        for (bin, sum) in bins.iter_mut().zip(sums) {
            bin.mean_predicted = (bin.count > 0).then(|| sum / bin.count as f64);
        }

        Self { bins }
    }
}
