//! Chronological play ordering
//!
//! Play ids are not reliable on their own: some games have broken ids that do
//! not follow the clock. Plays are therefore ordered by game, then by game clock
//! (descending seconds remaining), and only then by play id for plays sharing
//! the same clock value.
//!
//! The scoring-event labeler depends on this exact order.
//!
//! Missing clock values and missing play ids sort last within their group.

use std::cmp::Ordering;

use crate::record::PlayRecord;

/// Compares two plays in chronological order.
#[must_use]
pub fn compare_plays(a: &PlayRecord, b: &PlayRecord) -> Ordering {
    a.game_id
        .cmp(&b.game_id)
        .then_with(|| {
            compare_missing_last(a.game_seconds_remaining, b.game_seconds_remaining, |x, y| {
                y.total_cmp(&x)
            })
        })
        .then_with(|| compare_missing_last(a.play_id, b.play_id, |x, y| x.total_cmp(&y)))
}

fn compare_missing_last<F>(a: Option<f64>, b: Option<f64>, cmp: F) -> Ordering
where
    F: FnOnce(f64, f64) -> Ordering,
{
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sorts plays into chronological order.
///
/// The sort is stable, so plays that compare equal keep their input order.
pub fn sort_plays(records: &mut [PlayRecord]) {
    records.sort_by(compare_plays);
}

/// Returns `true` if `records` are in chronological order.
#[must_use]
pub fn is_chronological(records: &[PlayRecord]) -> bool {
    records.is_sorted_by(|a, b| compare_plays(a, b) != Ordering::Greater)
}
