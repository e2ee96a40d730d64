//! Scoring events
//!
//! A [`ScoringEvent`] is a scoring outcome seen from the perspective of the team
//! in possession on a given play: the [`ScoringKind`] says what happened, and
//! `is_opponent` says whether the *other* team scored it.
//!
//! # Label Table
//!
//! | label           | kind                 | opponent | points |
//! |-----------------|----------------------|----------|--------|
//! | `no_score`      | `NoScore`            | -        | 0      |
//! | `td`            | `Touchdown`          | no       | 6      |
//! | `fg`            | `FieldGoal`          | no       | 3      |
//! | `pat`           | `ExtraPoint`         | no       | 1      |
//! | `2pat`          | `TwoPointConversion` | no       | 2      |
//! | `safety`        | `Safety`             | no       | 2      |
//! | `opp_td`        | `Touchdown`          | yes      | -6     |
//! | `opp_fg`        | `FieldGoal`          | yes      | -3     |
//! | `opp_patreturn` | `PatReturn`          | yes      | -2     |
//! | `opp_safety`    | `Safety`             | yes      | -2     |
//!
//! Flipping possession can also produce `opp_pat`, `opp_2pat` and `patreturn`.
//! These are representable but have no point value: they only arise from
//! inconsistent source data and are dropped by the expected-points projector.
//!
//! `no_score` has no direction, so it is never marked as an opponent event.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// What kind of score happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::IsVariant)]
pub enum ScoringKind {
    NoScore,
    Touchdown,
    FieldGoal,
    ExtraPoint,
    TwoPointConversion,
    Safety,
    /// Defensive return of a point-after attempt
    PatReturn,
}

impl ScoringKind {
    fn label(self) -> &'static str {
        match self {
            ScoringKind::NoScore => "no_score",
            ScoringKind::Touchdown => "td",
            ScoringKind::FieldGoal => "fg",
            ScoringKind::ExtraPoint => "pat",
            ScoringKind::TwoPointConversion => "2pat",
            ScoringKind::Safety => "safety",
            ScoringKind::PatReturn => "patreturn",
        }
    }

    const ALL: [ScoringKind; 7] = [
        ScoringKind::NoScore,
        ScoringKind::Touchdown,
        ScoringKind::FieldGoal,
        ScoringKind::ExtraPoint,
        ScoringKind::TwoPointConversion,
        ScoringKind::Safety,
        ScoringKind::PatReturn,
    ];
}

/// A scoring outcome framed from one team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScoringEvent {
    kind: ScoringKind,
    is_opponent: bool,
}

impl ScoringEvent {
    pub const NO_SCORE: Self = Self::own(ScoringKind::NoScore);

    /// Creates an event scored by the team in possession.
    #[must_use]
    pub const fn own(kind: ScoringKind) -> Self {
        Self {
            kind,
            is_opponent: false,
        }
    }

    /// Creates an event scored by the team not in possession.
    ///
    /// `NoScore` has no direction and is returned unchanged.
    #[must_use]
    pub const fn opponent(kind: ScoringKind) -> Self {
        Self {
            kind,
            is_opponent: !matches!(kind, ScoringKind::NoScore),
        }
    }

    #[must_use]
    pub fn kind(self) -> ScoringKind {
        self.kind
    }

    #[must_use]
    pub fn is_opponent(self) -> bool {
        self.is_opponent
    }

    /// Returns the same event seen from the other team.
    ///
    /// ```
    /// use nflmodels_labeler::{ScoringEvent, ScoringKind};
    ///
    /// let td = ScoringEvent::own(ScoringKind::Touchdown);
    /// assert_eq!(td.flipped().to_string(), "opp_td");
    /// assert_eq!(td.flipped().flipped(), td);
    /// assert_eq!(ScoringEvent::NO_SCORE.flipped(), ScoringEvent::NO_SCORE);
    /// ```
    #[must_use]
    pub fn flipped(self) -> Self {
        if self.is_opponent {
            Self::own(self.kind)
        } else {
            Self::opponent(self.kind)
        }
    }

    /// Signed point value of the event, or `None` if the label is not in the
    /// point table.
    ///
    /// ```
    /// use nflmodels_labeler::ScoringEvent;
    ///
    /// let value = |label: &str| label.parse::<ScoringEvent>().unwrap().point_value();
    /// assert_eq!(value("2pat"), Some(2));
    /// assert_eq!(value("opp_safety"), Some(-2));
    /// assert_eq!(value("opp_pat"), None);
    /// ```
    #[must_use]
    pub fn point_value(self) -> Option<i8> {
        let value = match (self.kind, self.is_opponent) {
            (ScoringKind::NoScore, _) => 0,
            (ScoringKind::Touchdown, false) => 6,
            (ScoringKind::FieldGoal, false) => 3,
            (ScoringKind::ExtraPoint, false) => 1,
            (ScoringKind::TwoPointConversion | ScoringKind::Safety, false) => 2,
            (ScoringKind::Touchdown, true) => -6,
            (ScoringKind::FieldGoal, true) => -3,
            (ScoringKind::PatReturn | ScoringKind::Safety, true) => -2,
            (ScoringKind::ExtraPoint | ScoringKind::TwoPointConversion, true)
            | (ScoringKind::PatReturn, false) => return None,
        };
        Some(value)
    }

    /// Returns `true` for the point-after outcomes (`pat`, `2pat`, `opp_patreturn`).
    #[must_use]
    pub fn is_point_after(self) -> bool {
        matches!(
            self.kind,
            ScoringKind::ExtraPoint | ScoringKind::TwoPointConversion | ScoringKind::PatReturn
        )
    }
}

impl fmt::Display for ScoringEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opponent {
            write!(f, "opp_{}", self.kind.label())
        } else {
            f.write_str(self.kind.label())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown scoring event label '{label}'")]
pub struct ParseScoringEventError {
    #[error(not(source))]
    pub label: String,
}

impl FromStr for ScoringEvent {
    type Err = ParseScoringEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (is_opponent, kind_label) = match s.strip_prefix("opp_") {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        ScoringKind::ALL
            .into_iter()
            .find(|kind| kind.label() == kind_label)
            .filter(|kind| !(is_opponent && kind.is_no_score()))
            .map(|kind| Self { kind, is_opponent })
            .ok_or_else(|| ParseScoringEventError {
                label: s.to_owned(),
            })
    }
}

impl Serialize for ScoringEvent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ScoringEvent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: [(&str, i8); 10] = [
        ("no_score", 0),
        ("td", 6),
        ("fg", 3),
        ("pat", 1),
        ("2pat", 2),
        ("safety", 2),
        ("opp_td", -6),
        ("opp_fg", -3),
        ("opp_patreturn", -2),
        ("opp_safety", -2),
    ];

    #[test]
    fn test_point_table() {
        for (label, value) in TABLE {
            let event = label.parse::<ScoringEvent>().unwrap();
            assert_eq!(event.to_string(), label);
            assert_eq!(event.point_value(), Some(value), "{label}");
        }
    }

    #[test]
    fn test_labels_outside_table_have_no_value() {
        for label in ["opp_pat", "opp_2pat", "patreturn"] {
            let event = label.parse::<ScoringEvent>().unwrap();
            assert_eq!(event.point_value(), None, "{label}");
        }
    }

    #[test]
    fn test_unknown_label_is_error() {
        assert!("touchdown".parse::<ScoringEvent>().is_err());
        assert!("opp_no_score".parse::<ScoringEvent>().is_err());
        assert!("".parse::<ScoringEvent>().is_err());
    }

    #[test]
    fn test_flip_is_involution() {
        for kind in ScoringKind::ALL {
            let event = ScoringEvent::own(kind);
            assert_eq!(event.flipped().flipped(), event);
        }
        let td = ScoringEvent::own(ScoringKind::Touchdown);
        assert_eq!(td.flipped(), ScoringEvent::opponent(ScoringKind::Touchdown));
    }

    #[test]
    fn test_opponent_no_score_is_no_score() {
        assert_eq!(
            ScoringEvent::opponent(ScoringKind::NoScore),
            ScoringEvent::NO_SCORE
        );
        assert!(!ScoringEvent::NO_SCORE.flipped().is_opponent());
    }

    #[test]
    fn test_serde_uses_labels() {
        let event = ScoringEvent::opponent(ScoringKind::PatReturn);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, "\"opp_patreturn\"");
        let parsed: ScoringEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
        assert!(serde_json::from_str::<ScoringEvent>("\"opp_xp\"").is_err());
    }
}
