//! Next-scoring-event labeler
//!
//! Assigns to every play the next scoring event of its game segment, framed from
//! the perspective of the team in possession on that play.
//!
//! # Algorithm
//!
//! Plays are visited once, from the last play of the last game back to the first
//! play, carrying a [`LabelerState`]:
//!
//! ```text
//! for play in plays.rev():
//!     if (game_id, game_half) changed:  pending_event = no_score
//!     if play has an immediate event:   pending_event, pending_team = event, posteam
//!                                       label = event
//!     elif posteam == pending_team:     label = pending_event
//!     else:                             label = pending_event.flipped()
//! ```
//!
//! Scanning backward, a change of `posteam` means possession changed *later* in
//! real time, so the pending score belongs to the other team from this play's
//! point of view. `no_score` has no direction and is never flipped.
//!
//! # Ordering Contract
//!
//! The input must be in chronological order (see
//! [`nflmodels_data::order::sort_plays`]). The result is only meaningful for that
//! order; the labeler does not sort.
//!
//! # Example
//!
//! ```
//! use nflmodels_labeler::{LabelInput, ScoringEvent, ScoringKind, label_next_scores};
//!
//! let td = ScoringEvent::own(ScoringKind::Touchdown);
//! let plays = [
//!     LabelInput::new("g1", Some("Half1"), "A", None),
//!     LabelInput::new("g1", Some("Half1"), "B", None),
//!     LabelInput::new("g1", Some("Half1"), "B", Some(td)),
//! ];
//! let labels = label_next_scores(&plays)
//!     .iter()
//!     .map(ToString::to_string)
//!     .collect::<Vec<_>>();
//! assert_eq!(labels, ["opp_td", "td", "td"]);
//! ```

use nflmodels_data::PlayRecord;

use crate::{event::ScoringEvent, immediate::immediate_event};

/// The per-play input of the labeler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelInput<'a> {
    pub game_id: &'a str,
    pub game_half: Option<&'a str>,
    /// Team in possession
    pub posteam: &'a str,
    /// Scoring event produced by this play, if any
    pub immediate: Option<ScoringEvent>,
}

impl<'a> LabelInput<'a> {
    #[must_use]
    pub fn new(
        game_id: &'a str,
        game_half: Option<&'a str>,
        posteam: &'a str,
        immediate: Option<ScoringEvent>,
    ) -> Self {
        Self {
            game_id,
            game_half,
            posteam,
            immediate,
        }
    }

    /// Builds the labeler input for a play record.
    ///
    /// Returns `None` when `posteam` is missing; such plays (timeouts, end of
    /// quarter markers) must be filtered out before labeling.
    #[must_use]
    pub fn from_record(record: &'a PlayRecord) -> Option<Self> {
        Some(Self {
            game_id: &record.game_id,
            game_half: record.game_half.as_deref(),
            posteam: record.posteam.as_deref()?,
            immediate: immediate_event(record),
        })
    }

    fn segment(&self) -> (&'a str, Option<&'a str>) {
        (self.game_id, self.game_half)
    }
}

/// State carried between plays during the backward scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelerState<'a> {
    segment: Option<(&'a str, Option<&'a str>)>,
    pending_event: ScoringEvent,
    pending_team: Option<&'a str>,
}

impl Default for LabelerState<'_> {
    fn default() -> Self {
        Self {
            segment: None,
            pending_event: ScoringEvent::NO_SCORE,
            pending_team: None,
        }
    }
}

impl<'a> LabelerState<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The event that will be carried to the previous play.
    #[must_use]
    pub fn pending_event(&self) -> ScoringEvent {
        self.pending_event
    }

    /// Labels one play and updates the carried state.
    ///
    /// Plays must be fed in reverse chronological order.
    pub fn step(&mut self, play: &LabelInput<'a>) -> ScoringEvent {
        let segment = play.segment();
        if self.segment != Some(segment) {
            self.segment = Some(segment);
            self.pending_event = ScoringEvent::NO_SCORE;
        }

        if let Some(event) = play.immediate {
            self.pending_event = event;
            self.pending_team = Some(play.posteam);
            return event;
        }

        if self.pending_team == Some(play.posteam) {
            self.pending_event
        } else {
            self.pending_event.flipped()
        }
    }
}

/// Labels every play with the next scoring event of its segment.
///
/// `plays` must be in chronological order. The output has one label per input
/// play, in the same order.
#[must_use]
pub fn label_next_scores(plays: &[LabelInput<'_>]) -> Vec<ScoringEvent> {
    let mut state = LabelerState::new();
    let mut labels = plays
        .iter()
        .rev()
        .map(|play| state.step(play))
        .collect::<Vec<_>>();
    labels.reverse();
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ScoringKind;

    const TD: ScoringEvent = ScoringEvent::own(ScoringKind::Touchdown);
    const FG: ScoringEvent = ScoringEvent::own(ScoringKind::FieldGoal);

    fn play<'a>(
        game_id: &'a str,
        half: &'a str,
        team: &'a str,
        immediate: Option<ScoringEvent>,
    ) -> LabelInput<'a> {
        LabelInput::new(game_id, Some(half), team, immediate)
    }

    fn labels(plays: &[LabelInput<'_>]) -> Vec<String> {
        label_next_scores(plays)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_possession_change_flips_pending_event() {
        let plays = [
            play("g1", "Half1", "A", None),
            play("g1", "Half1", "B", None),
            play("g1", "Half1", "B", Some(TD)),
        ];
        assert_eq!(labels(&plays), ["opp_td", "td", "td"]);
    }

    #[test]
    fn test_constant_possession_gives_constant_labels() {
        let plays = [
            play("g1", "Half1", "A", None),
            play("g1", "Half1", "A", None),
            play("g1", "Half1", "A", None),
            play("g1", "Half1", "A", Some(FG)),
        ];
        assert_eq!(labels(&plays), ["fg", "fg", "fg", "fg"]);
    }

    #[test]
    fn test_double_flip_restores_label() {
        let plays = [
            play("g1", "Half1", "A", None),
            play("g1", "Half1", "B", None),
            play("g1", "Half1", "A", Some(TD)),
        ];
        // B sees A's touchdown as an opponent score, A sees its own
        assert_eq!(labels(&plays), ["td", "opp_td", "td"]);
    }

    #[test]
    fn test_scoring_play_keeps_its_own_event() {
        let opp_td = ScoringEvent::opponent(ScoringKind::Touchdown);
        let plays = [
            play("g1", "Half1", "B", None),
            play("g1", "Half1", "A", Some(opp_td)),
            play("g1", "Half1", "A", None),
            play("g1", "Half1", "B", Some(FG)),
        ];
        let result = label_next_scores(&plays);
        for (input, label) in plays.iter().zip(&result) {
            if let Some(event) = input.immediate {
                assert_eq!(*label, event);
            }
        }
        // The pick-six by B is an opponent touchdown for A, so B's own touchdown
        assert_eq!(result[0], TD);
    }

    #[test]
    fn test_no_score_is_never_flipped() {
        let plays = [
            play("g1", "Half1", "A", None),
            play("g1", "Half1", "B", None),
            play("g1", "Half1", "A", None),
        ];
        assert_eq!(labels(&plays), ["no_score", "no_score", "no_score"]);
    }

    #[test]
    fn test_resolved_conversion_stops_later_scores() {
        let plays = [
            play("g1", "Half1", "A", Some(TD)),
            play("g1", "Half1", "A", Some(ScoringEvent::NO_SCORE)),
            play("g1", "Half1", "B", None),
            play("g1", "Half1", "B", Some(FG)),
        ];
        assert_eq!(labels(&plays), ["td", "no_score", "fg", "fg"]);
    }

    #[test]
    fn test_state_resets_at_half_boundary() {
        let plays = [
            play("g1", "Half1", "A", None),
            play("g1", "Half2", "A", None),
            play("g1", "Half2", "A", Some(TD)),
        ];
        assert_eq!(labels(&plays), ["no_score", "td", "td"]);
    }

    #[test]
    fn test_state_resets_at_game_boundary() {
        // Two one-play segments with different outcomes
        let plays = [
            play("g1", "Half2", "A", None),
            play("g2", "Half2", "A", Some(FG)),
        ];
        assert_eq!(labels(&plays), ["no_score", "fg"]);

        let plays = [
            play("g1", "Half1", "A", Some(TD)),
            play("g2", "Half1", "A", None),
        ];
        assert_eq!(labels(&plays), ["td", "no_score"]);
    }

    #[test]
    fn test_segment_with_same_half_name_in_other_game_does_not_leak() {
        let plays = [
            play("g1", "Half1", "A", None),
            play("g2", "Half1", "B", None),
            play("g2", "Half1", "B", Some(TD)),
        ];
        assert_eq!(labels(&plays), ["no_score", "td", "td"]);
    }

    #[test]
    fn test_one_label_per_play_and_idempotent() {
        let plays = [
            play("g1", "Half1", "A", None),
            play("g1", "Half1", "B", Some(FG)),
            play("g1", "Half1", "A", None),
            play("g1", "Half2", "B", None),
            play("g1", "Half2", "A", Some(TD)),
            play("g1", "Half2", "A", Some(ScoringEvent::own(ScoringKind::ExtraPoint))),
            play("g1", "Half2", "B", None),
        ];
        let first = label_next_scores(&plays);
        let second = label_next_scores(&plays);
        assert_eq!(first.len(), plays.len());
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        assert!(label_next_scores(&[]).is_empty());
    }

    #[test]
    fn test_from_record_requires_posteam() {
        let mut record = PlayRecord {
            game_id: "g1".to_owned(),
            game_half: Some("Half1".to_owned()),
            ..Default::default()
        };
        assert_eq!(LabelInput::from_record(&record), None);
        record.posteam = Some("A".to_owned());
        let input = LabelInput::from_record(&record).unwrap();
        assert_eq!(input.posteam, "A");
        assert_eq!(input.immediate, None);
    }
}
