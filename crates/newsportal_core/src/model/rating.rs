//! Bounded popularity counter shared by posts and comments.
//!
//! # Invariants
//! - A rating always fits in `i16` (-32768..=32767).
//! - Changes never clamp: stepping past a bound is an error and the
//!   previous value stays untouched.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Signed small-integer rating of one post or comment.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Rating(i16);

impl Rating {
    pub const ZERO: Rating = Rating(0);

    pub const fn new(value: i16) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i16 {
        self.0
    }

    /// Returns the rating one step up.
    pub fn increment(self) -> Result<Self, RatingOutOfRange> {
        self.apply(RatingChange::Like)
    }

    /// Returns the rating one step down. Negative values are allowed.
    pub fn decrement(self) -> Result<Self, RatingOutOfRange> {
        self.apply(RatingChange::Dislike)
    }

    /// Applies one like/dislike step with checked arithmetic.
    pub fn apply(self, change: RatingChange) -> Result<Self, RatingOutOfRange> {
        self.0
            .checked_add(change.delta())
            .map(Self)
            .ok_or(RatingOutOfRange {
                current: self.0,
                change,
            })
    }
}

impl From<i16> for Rating {
    fn from(value: i16) -> Self {
        Self(value)
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of one rating step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingChange {
    Like,
    Dislike,
}

impl RatingChange {
    pub fn delta(self) -> i16 {
        match self {
            Self::Like => 1,
            Self::Dislike => -1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

/// A rating step would leave the `i16` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingOutOfRange {
    pub current: i16,
    pub change: RatingChange,
}

impl Display for RatingOutOfRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "rating {} cannot take another {} without leaving {}..={}",
            self.current,
            self.change.as_str(),
            i16::MIN,
            i16::MAX
        )
    }
}

impl Error for RatingOutOfRange {}

/// Content that carries a rating counter.
pub trait Rated {
    fn rating(&self) -> Rating;
    fn set_rating(&mut self, rating: Rating);
}
