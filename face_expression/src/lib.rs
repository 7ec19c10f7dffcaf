//! # face_expression
//!
//! The expression model behind the cartoon face: what the eyes are doing and
//! where the mouth sits on a five-step mood scale.
//!
//! A [`FacialExpression`] is a plain `Copy` value.  Gestures never mutate it;
//! they produce a new one through [`happier`], [`sadder`] or [`toggle_eyes`]
//! and the caller replaces its old value wholesale.
//!
//! ## Mood scale
//!
//! | Mouth | Curvature |
//! |---|---|
//! | `frown`   | -1.0 |
//! | `smirk`   | -0.5 |
//! | `neutral` |  0.0 |
//! | `grin`    |  0.5 |
//! | `smile`   |  1.0 |
//!
//! ```rust
//! use face_expression::{FacialExpression, Eyes, Mouth, happier};
//!
//! let e = FacialExpression::new(Eyes::Closed, Mouth::Frown);
//! let e = happier(happier(happier(e)));
//! assert_eq!(e.mouth, Mouth::Grin);
//! assert_eq!(e.mouth.curvature(), 0.5);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ════════════════════════════════════════════════════════════════════════════
// Eyes
// ════════════════════════════════════════════════════════════════════════════

/// State of both eyes.
///
/// `Squinting` is kept as a reserved state: no gesture reaches it and it
/// renders exactly like `Closed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Eyes {
    Open,
    Closed,
    Squinting,
}

impl Eyes {
    pub const ALL: [Eyes; 3] = [Eyes::Open, Eyes::Closed, Eyes::Squinting];

    /// Only `Open` draws round eyes.
    pub fn is_open(self) -> bool {
        matches!(self, Eyes::Open)
    }

    pub fn name(self) -> &'static str {
        match self {
            Eyes::Open      => "open",
            Eyes::Closed    => "closed",
            Eyes::Squinting => "squinting",
        }
    }

    /// Two-state flip: `Closed` opens, everything else closes.
    pub fn toggled(self) -> Eyes {
        match self {
            Eyes::Closed => Eyes::Open,
            _            => Eyes::Closed,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Mouth
// ════════════════════════════════════════════════════════════════════════════

/// Mouth mood, ordered from saddest to happiest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mouth {
    Frown,
    Smirk,
    Neutral,
    Grin,
    Smile,
}

impl Mouth {
    /// Every mood in scale order.
    pub const ALL: [Mouth; 5] = [
        Mouth::Frown,
        Mouth::Smirk,
        Mouth::Neutral,
        Mouth::Grin,
        Mouth::Smile,
    ];

    /// Position on the scale, 0 (frown) to 4 (smile).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Mouth> {
        Mouth::ALL.get(i).copied()
    }

    /// Signed mouth curvature in [-1, 1]; -1 is a full frown.
    pub fn curvature(self) -> f64 {
        match self {
            Mouth::Frown   => -1.0,
            Mouth::Smirk   => -0.5,
            Mouth::Neutral =>  0.0,
            Mouth::Grin    =>  0.5,
            Mouth::Smile   =>  1.0,
        }
    }

    /// One step toward `Smile`, saturating.
    pub fn happier(self) -> Mouth {
        Mouth::from_index(self.index() + 1).unwrap_or(Mouth::Smile)
    }

    /// One step toward `Frown`, saturating.
    pub fn sadder(self) -> Mouth {
        self.index()
            .checked_sub(1)
            .and_then(Mouth::from_index)
            .unwrap_or(Mouth::Frown)
    }

    pub fn name(self) -> &'static str {
        match self {
            Mouth::Frown   => "frown",
            Mouth::Smirk   => "smirk",
            Mouth::Neutral => "neutral",
            Mouth::Grin    => "grin",
            Mouth::Smile   => "smile",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Name parsing
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseExpressionError {
    #[error("unknown eyes state `{0}` (expected open, closed or squinting)")]
    UnknownEyes(String),
    #[error("unknown mouth `{0}` (expected frown, smirk, neutral, grin or smile)")]
    UnknownMouth(String),
}

impl FromStr for Eyes {
    type Err = ParseExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Eyes::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseExpressionError::UnknownEyes(s.to_string()))
    }
}

impl FromStr for Mouth {
    type Err = ParseExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Mouth::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseExpressionError::UnknownMouth(s.to_string()))
    }
}

impl fmt::Display for Eyes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Mouth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FacialExpression
// ════════════════════════════════════════════════════════════════════════════

/// Eyes plus mouth.  Always fully specified; replaced, never edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FacialExpression {
    pub eyes:  Eyes,
    pub mouth: Mouth,
}

impl FacialExpression {
    pub const fn new(eyes: Eyes, mouth: Mouth) -> Self {
        FacialExpression { eyes, mouth }
    }

    pub fn happier(self) -> Self { happier(self) }
    pub fn sadder(self) -> Self { sadder(self) }
    pub fn toggle_eyes(self) -> Self { toggle_eyes(self) }
}

impl Default for FacialExpression {
    /// Eyes shut, frowning.
    fn default() -> Self {
        FacialExpression::new(Eyes::Closed, Mouth::Frown)
    }
}

impl fmt::Display for FacialExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "eyes {} / mouth {}", self.eyes, self.mouth)
    }
}

/// Step the mouth one notch toward a smile.  Eyes pass through.
pub fn happier(e: FacialExpression) -> FacialExpression {
    FacialExpression { mouth: e.mouth.happier(), ..e }
}

/// Step the mouth one notch toward a frown.  Eyes pass through.
pub fn sadder(e: FacialExpression) -> FacialExpression {
    FacialExpression { mouth: e.mouth.sadder(), ..e }
}

/// Open closed eyes; close anything else (squinting included).
pub fn toggle_eyes(e: FacialExpression) -> FacialExpression {
    FacialExpression { eyes: e.eyes.toggled(), ..e }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn every_expression() -> impl Iterator<Item = FacialExpression> {
        Eyes::ALL.into_iter().flat_map(|eyes| {
            Mouth::ALL.into_iter().map(move |mouth| FacialExpression::new(eyes, mouth))
        })
    }

    #[test]
    fn four_happier_steps_always_reach_smile() {
        for e in every_expression() {
            let mut cur = e;
            for _ in 0..4 { cur = happier(cur); }
            assert_eq!(cur.mouth, Mouth::Smile, "from {}", e);
            assert_eq!(happier(cur).mouth, Mouth::Smile);
            assert_eq!(cur.eyes, e.eyes);
        }
    }

    #[test]
    fn four_sadder_steps_always_reach_frown() {
        for e in every_expression() {
            let mut cur = e;
            for _ in 0..4 { cur = sadder(cur); }
            assert_eq!(cur.mouth, Mouth::Frown, "from {}", e);
            assert_eq!(sadder(cur).mouth, Mouth::Frown);
            assert_eq!(cur.eyes, e.eyes);
        }
    }

    #[test]
    fn happier_is_monotonic() {
        for e in every_expression() {
            assert!(happier(e).mouth >= e.mouth);
            assert!(sadder(e).mouth <= e.mouth);
        }
    }

    #[test]
    fn three_steps_from_frown_land_on_grin() {
        let start = FacialExpression::new(Eyes::Closed, Mouth::Frown);
        let e = start.happier().happier().happier();
        assert_eq!(e.mouth, Mouth::Grin);
        assert_eq!(e.happier().mouth, Mouth::Smile);
        assert_eq!(e.eyes, Eyes::Closed);
    }

    #[test]
    fn toggle_eyes_is_a_two_cycle() {
        for mouth in Mouth::ALL {
            for eyes in [Eyes::Open, Eyes::Closed] {
                let e = FacialExpression::new(eyes, mouth);
                assert_eq!(toggle_eyes(toggle_eyes(e)), e);
                assert_ne!(toggle_eyes(e).eyes, eyes);
                assert_eq!(toggle_eyes(e).mouth, mouth);
            }
        }
    }

    #[test]
    fn squinting_toggles_to_closed() {
        let e = FacialExpression::new(Eyes::Squinting, Mouth::Neutral);
        assert_eq!(toggle_eyes(e).eyes, Eyes::Closed);
        assert!(!Eyes::Squinting.is_open());
    }

    #[test]
    fn curvature_table_matches_scale() {
        let expected = [-1.0, -0.5, 0.0, 0.5, 1.0];
        for (m, want) in Mouth::ALL.into_iter().zip(expected) {
            assert_eq!(m.curvature(), want);
            assert!((-1.0..=1.0).contains(&m.curvature()));
        }
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for m in Mouth::ALL {
            assert_eq!(m.name().parse::<Mouth>(), Ok(m));
        }
        assert_eq!(" OPEN ".parse::<Eyes>(), Ok(Eyes::Open));
        assert_eq!(
            "wink".parse::<Eyes>(),
            Err(ParseExpressionError::UnknownEyes("wink".into()))
        );
        assert!("grimace".parse::<Mouth>().is_err());
    }

    #[test]
    fn default_is_closed_frown() {
        assert_eq!(
            FacialExpression::default(),
            FacialExpression::new(Eyes::Closed, Mouth::Frown)
        );
    }
}
