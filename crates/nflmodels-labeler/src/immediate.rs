//! Scoring events that happen on the play itself
//!
//! Before labeling, each play is checked for an *immediate* event: the score, if
//! any, produced by that very play. The score change is read from the
//! possessing team's score differential, so a pick-six shows up as `-6`
//! (`opp_td`) on the offense's play.
//!
//! Extra point and two point attempts always resolve: an attempt without a
//! score becomes an immediate `no_score` event instead of "no event", so the
//! labeler treats it as a resolved outcome rather than carrying a later score
//! back onto it.

use nflmodels_data::{PlayRecord, flag};

use crate::event::{ScoringEvent, ScoringKind};

/// Points gained by the possessing team on this play.
///
/// Returns `None` for plays that are neither scoring plays nor conversion
/// attempts.
#[expect(clippy::cast_possible_truncation)]
#[must_use]
pub fn points_gained(play: &PlayRecord) -> Option<i32> {
    let gained = if play.is_scoring_play() {
        match (play.score_differential_post, play.score_differential) {
            (Some(post), Some(pre)) => Some((post - pre).round() as i32),
            _ => None,
        }
    } else {
        None
    };
    match gained {
        None if play.is_conversion_attempt() => Some(0),
        gained => gained,
    }
}

/// Derives the immediate scoring event of a play.
///
/// A gain of two points is a safety or a two point conversion depending on the
/// `safety` column, and a loss of two points is a defensive safety or a
/// returned conversion. When `safety` is missing the two cases cannot be told
/// apart and the play is treated as non-scoring. Unrecognized point values are
/// treated as non-scoring as well.
///
/// # Examples
///
/// ```
/// use nflmodels_data::PlayRecord;
/// use nflmodels_labeler::immediate::immediate_event;
///
/// let field_goal = PlayRecord {
///     sp: Some(1.0),
///     score_differential: Some(-3.0),
///     score_differential_post: Some(0.0),
///     ..Default::default()
/// };
/// assert_eq!(immediate_event(&field_goal).unwrap().to_string(), "fg");
///
/// let missed_extra_point = PlayRecord {
///     sp: Some(0.0),
///     extra_point_attempt: Some(1.0),
///     ..Default::default()
/// };
/// assert_eq!(immediate_event(&missed_extra_point).unwrap().to_string(), "no_score");
///
/// assert_eq!(immediate_event(&PlayRecord::default()), None);
/// ```
#[must_use]
pub fn immediate_event(play: &PlayRecord) -> Option<ScoringEvent> {
    let safety = flag(play.safety);
    let event = match (points_gained(play)?, safety) {
        (0, _) => ScoringEvent::NO_SCORE,
        (6, _) => ScoringEvent::own(ScoringKind::Touchdown),
        (3, _) => ScoringEvent::own(ScoringKind::FieldGoal),
        (1, _) => ScoringEvent::own(ScoringKind::ExtraPoint),
        (-6, _) => ScoringEvent::opponent(ScoringKind::Touchdown),
        (-3, _) => ScoringEvent::opponent(ScoringKind::FieldGoal),
        (2, Some(true)) => ScoringEvent::own(ScoringKind::Safety),
        (2, Some(false)) => ScoringEvent::own(ScoringKind::TwoPointConversion),
        (-2, Some(false)) => ScoringEvent::opponent(ScoringKind::PatReturn),
        (-2, Some(true)) => ScoringEvent::opponent(ScoringKind::Safety),
        _ => return None,
    };
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scoring(pre: f64, post: f64, safety: Option<f64>) -> PlayRecord {
        PlayRecord {
            sp: Some(1.0),
            score_differential: Some(pre),
            score_differential_post: Some(post),
            safety,
            ..Default::default()
        }
    }

    fn label(play: &PlayRecord) -> Option<String> {
        immediate_event(play).map(|e| e.to_string())
    }

    #[test]
    fn test_mapping_table() {
        let cases = [
            (scoring(0.0, 6.0, Some(0.0)), "td"),
            (scoring(7.0, 10.0, Some(0.0)), "fg"),
            (scoring(6.0, 7.0, Some(0.0)), "pat"),
            (scoring(6.0, 8.0, Some(0.0)), "2pat"),
            (scoring(0.0, 2.0, Some(1.0)), "safety"),
            (scoring(0.0, -6.0, Some(0.0)), "opp_td"),
            (scoring(3.0, 0.0, Some(0.0)), "opp_fg"),
            (scoring(6.0, 4.0, Some(0.0)), "opp_patreturn"),
            (scoring(-1.0, -3.0, Some(1.0)), "opp_safety"),
        ];
        for (play, expected) in cases {
            assert_eq!(label(&play).as_deref(), Some(expected));
        }
    }

    #[test]
    fn test_non_scoring_play_has_no_event() {
        let play = PlayRecord {
            sp: Some(0.0),
            score_differential: Some(0.0),
            score_differential_post: Some(0.0),
            ..Default::default()
        };
        assert_eq!(points_gained(&play), None);
        assert_eq!(label(&play), None);
    }

    #[test]
    fn test_failed_conversion_resolves_to_zero() {
        let failed_two_point = PlayRecord {
            sp: Some(0.0),
            two_point_attempt: Some(1.0),
            ..Default::default()
        };
        assert_eq!(points_gained(&failed_two_point), Some(0));
        assert_eq!(label(&failed_two_point).as_deref(), Some("no_score"));
    }

    #[test]
    fn test_successful_conversion_keeps_its_points() {
        let mut good_extra_point = scoring(6.0, 7.0, Some(0.0));
        good_extra_point.extra_point_attempt = Some(1.0);
        assert_eq!(points_gained(&good_extra_point), Some(1));
    }

    #[test]
    fn test_two_points_without_safety_column_is_unresolved() {
        assert_eq!(label(&scoring(0.0, 2.0, None)), None);
        assert_eq!(label(&scoring(0.0, -2.0, None)), None);
    }

    #[test]
    fn test_unexpected_point_values_are_unresolved() {
        assert_eq!(label(&scoring(0.0, 8.0, Some(0.0))), None);
        assert_eq!(label(&scoring(0.0, -1.0, Some(0.0))), None);
    }
}
