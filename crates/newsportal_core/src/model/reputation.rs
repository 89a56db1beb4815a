//! Author reputation weighting.
//!
//! # Invariants
//! - `score = post_rating_sum * 3 + comment_rating_sum`.
//! - An empty content set contributes exactly 0.
//! - Sums are carried in `i64`, wide enough for any number of `i16` ratings
//!   the store can hold.

use crate::model::comment::Comment;
use crate::model::post::Post;
use crate::model::rating::Rated;
use serde::{Deserialize, Serialize};

pub const POST_RATING_WEIGHT: i64 = 3;
pub const COMMENT_RATING_WEIGHT: i64 = 1;

/// Sums the ratings of `units`; no units means a sum of 0.
pub fn rating_sum<T: Rated>(units: &[T]) -> i64 {
    if units.is_empty() {
        return 0;
    }
    units
        .iter()
        .map(|unit| i64::from(unit.rating().value()))
        .sum()
}

/// Combines the two sums with the fixed weights.
pub fn weighted_score(post_rating_sum: i64, comment_rating_sum: i64) -> i64 {
    post_rating_sum * POST_RATING_WEIGHT + comment_rating_sum * COMMENT_RATING_WEIGHT
}

/// Inputs and result of one reputation computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationBreakdown {
    pub post_count: usize,
    pub post_rating_sum: i64,
    pub comment_count: usize,
    pub comment_rating_sum: i64,
    pub score: i64,
}

impl ReputationBreakdown {
    /// Computes the breakdown over an author's posts and the comments their
    /// account wrote.
    pub fn compute(posts: &[Post], comments: &[Comment]) -> Self {
        let post_rating_sum = rating_sum(posts);
        let comment_rating_sum = rating_sum(comments);
        Self {
            post_count: posts.len(),
            post_rating_sum,
            comment_count: comments.len(),
            comment_rating_sum,
            score: weighted_score(post_rating_sum, comment_rating_sum),
        }
    }
}
