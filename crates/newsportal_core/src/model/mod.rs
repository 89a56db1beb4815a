//! Domain records for the portal and the rating/reputation arithmetic.
//!
//! # Responsibility
//! - Define typed records for accounts, authors, posts, comments and
//!   categories.
//! - Own the bounded rating counter and the reputation weighting policy.
//!
//! # Invariants
//! - Every record is identified by a stable UUID v4.
//! - Model code never touches storage; persistence is the repository's job.

pub mod author;
pub mod category;
pub mod comment;
pub mod post;
pub mod rating;
pub mod reputation;
pub mod validation;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in Unix epoch milliseconds.
pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
