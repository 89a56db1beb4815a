//! Comments left on posts by any account.

use crate::model::author::AccountId;
use crate::model::now_epoch_ms;
use crate::model::post::PostId;
use crate::model::rating::{Rated, Rating};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CommentId = Uuid;

/// A comment references the writing account, not an author: readers
/// without an author profile may comment too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub account_id: AccountId,
    pub body: String,
    pub rating: Rating,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Comment {
    pub fn new(post_id: PostId, account_id: AccountId, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            account_id,
            body: body.into(),
            rating: Rating::ZERO,
            created_at: now_epoch_ms(),
        }
    }
}

impl Rated for Comment {
    fn rating(&self) -> Rating {
        self.rating
    }

    fn set_rating(&mut self, rating: Rating) {
        self.rating = rating;
    }
}
