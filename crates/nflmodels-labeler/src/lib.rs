//! Scoring-event labeling for expected-points models.
//!
//! The expected-points target of a play is the *next* scoring event of its game
//! segment, seen from the team in possession on that play. This crate derives
//! that target in three steps:
//!
//! 1. **Immediate events** ([`immediate`]): the score produced by each play
//!    itself, read from the score differential columns.
//! 2. **Backward scan** ([`labeler`]): one pass from the last play to the first,
//!    carrying the pending event and the team that scored it, resetting at each
//!    `(game_id, game_half)` boundary and flipping the event when possession
//!    differs.
//! 3. **Point values** ([`ScoringEvent::point_value`]): the fixed signed point
//!    table used as the regression-style value of each label.
//!
//! # Architecture
//!
//! ```text
//! PlayRecord (chronological order)
//!     ↓ immediate_event
//! LabelInput { game_id, game_half, posteam, immediate }
//!     ↓ label_next_scores (reverse fold over LabelerState)
//! ScoringEvent per play
//!     ↓ point_value
//! signed points
//! ```
//!
//! # Design Notes
//!
//! - Events are a tagged type ([`ScoringEvent`] = [`ScoringKind`] + opponent
//!   flag) rather than `opp_`-prefixed strings; the strings only exist at the
//!   `Display`/`FromStr` boundary.
//! - The labeler is pure: it reads its input and returns a new label vector.
//! - Segments never share state, so labeling could be split per segment. The
//!   current implementation is a single sequential pass.
//!
//! # Open Question
//!
//! A touchdown is usually followed by a conversion attempt, which could argue
//! for valuing `td` above 6. The point table does not assume this.

pub use self::{
    event::{ParseScoringEventError, ScoringEvent, ScoringKind},
    labeler::{LabelInput, LabelerState, label_next_scores},
};

pub mod event;
pub mod immediate;
pub mod labeler;
