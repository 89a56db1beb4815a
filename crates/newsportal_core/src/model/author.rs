//! Accounts and the author records that own published content.
//!
//! # Invariants
//! - An author is backed by exactly one account and no account backs two
//!   authors.
//! - `reputation_score` is a cache; it is only correct right after
//!   `ReputationService::recompute_reputation` runs for this author.

use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type AccountId = Uuid;
pub type AuthorId = Uuid;

pub const USERNAME_MAX_CHARS: usize = 150;

/// Minimal view of a user account. Comments are written by accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
}

impl Account {
    /// Creates an account with surrounding whitespace trimmed from `username`.
    pub fn new(username: impl AsRef<str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.as_ref().trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("username", &self.username, USERNAME_MAX_CHARS)
    }
}

/// Publishing identity of an account, carrying the cached reputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub account_id: AccountId,
    pub reputation_score: i64,
}

impl Author {
    /// Creates an author for `account_id` with a zero score.
    pub fn new(account_id: AccountId) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            reputation_score: 0,
        }
    }
}
