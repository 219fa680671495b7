//! Stroke fragments: which strokes of a character belong to a component.
//!
//! A [`Fragment`] is either a closed-open stroke range or an open-ended range
//! running to the last stroke. A [`StrokeSplit`] describes how a two-part
//! character divides its strokes, and [`StrokeSplit::fragments`] turns it
//! into concrete left/right fragments.

use serde::{Deserialize, Serialize};

/// A stroke-index range attributed to one component.
///
/// Serializes as `[start, end]` or `[start]`, the shape the highlighting
/// layer expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub enum Fragment {
    /// Strokes `start..end`.
    Range { start: u32, end: u32 },
    /// Strokes `start..` up to the end of the character.
    From { start: u32 },
}

impl Fragment {
    pub fn range(start: u32, end: u32) -> Self {
        Self::Range { start, end }
    }

    pub fn from_stroke(start: u32) -> Self {
        Self::From { start }
    }

    pub fn start(&self) -> u32 {
        match self {
            Self::Range { start, .. } | Self::From { start } => *start,
        }
    }

    /// Exclusive end, or `None` when open-ended.
    pub fn end(&self) -> Option<u32> {
        match self {
            Self::Range { end, .. } => Some(*end),
            Self::From { .. } => None,
        }
    }
}

impl From<Fragment> for Vec<u32> {
    fn from(fragment: Fragment) -> Self {
        match fragment {
            Fragment::Range { start, end } => vec![start, end],
            Fragment::From { start } => vec![start],
        }
    }
}

impl TryFrom<Vec<u32>> for Fragment {
    type Error = String;

    fn try_from(bounds: Vec<u32>) -> Result<Self, Self::Error> {
        match bounds.as_slice() {
            [start] => Ok(Self::From { start: *start }),
            [start, end] => Ok(Self::Range {
                start: *start,
                end: *end,
            }),
            other => Err(format!(
                "fragment must be [start] or [start, end], got {} bounds",
                other.len()
            )),
        }
    }
}

/// Left and right fragments of a two-part character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragments {
    pub left: Fragment,
    pub right: Fragment,
}

/// How a two-part character divides its strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StrokeSplit {
    /// The first `n` strokes belong to the left component, the rest to the right.
    At(u32),
    /// Ranges that are not a single cut, e.g. one component enclosing the other.
    Explicit { left: Fragment, right: Fragment },
}

impl StrokeSplit {
    /// Compute the fragments, swapping them afterwards when `reversed`.
    ///
    /// Reversal only moves stroke ranges between the two sides; which
    /// component is the meaning and which the sound is fixed by the caller.
    pub fn fragments(self, reversed: bool) -> Fragments {
        let (left, right) = match self {
            Self::At(n) => (Fragment::range(0, n), Fragment::from_stroke(n)),
            Self::Explicit { left, right } => (left, right),
        };
        if reversed {
            Fragments {
                left: right,
                right: left,
            }
        } else {
            Fragments { left, right }
        }
    }
}

impl From<u32> for StrokeSplit {
    fn from(n: u32) -> Self {
        Self::At(n)
    }
}

impl From<(Fragment, Fragment)> for StrokeSplit {
    fn from((left, right): (Fragment, Fragment)) -> Self {
        Self::Explicit { left, right }
    }
}
