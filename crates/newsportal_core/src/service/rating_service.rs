//! Like/dislike use-cases for posts and comments.
//!
//! # Invariants
//! - Each successful call performs exactly one `save_*` of the touched unit.
//! - The read and the save share one write transaction, so concurrent
//!   likes on the same unit never lose an update.
//! - A step past the `i16` range fails and persists nothing.

use crate::model::comment::CommentId;
use crate::model::post::PostId;
use crate::model::rating::{Rated, Rating, RatingChange, RatingOutOfRange};
use crate::repo::content_repo::{ContentRepository, EntityKind, RepoError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;
use uuid::Uuid;

/// Errors from rating use-cases.
#[derive(Debug)]
pub enum RatingServiceError {
    /// Target post or comment does not exist.
    NotFound { kind: EntityKind, id: Uuid },
    /// The step would leave the small-integer range.
    OutOfRange(RatingOutOfRange),
    /// Persistence-layer failure, surfaced unchanged.
    Repo(RepoError),
}

impl Display for RatingServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::OutOfRange(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RatingServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::OutOfRange(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for RatingServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { kind, id } => Self::NotFound { kind, id },
            other => Self::Repo(other),
        }
    }
}

impl From<RatingOutOfRange> for RatingServiceError {
    fn from(value: RatingOutOfRange) -> Self {
        Self::OutOfRange(value)
    }
}

/// Rating counter mutations for posts and comments.
pub struct RatingService<R: ContentRepository> {
    repo: R,
}

impl<R: ContentRepository> RatingService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds one to the post rating; returns the new value.
    pub fn like_post(&self, id: PostId) -> Result<i16, RatingServiceError> {
        self.change_post(id, RatingChange::Like)
    }

    /// Subtracts one from the post rating; returns the new value.
    pub fn dislike_post(&self, id: PostId) -> Result<i16, RatingServiceError> {
        self.change_post(id, RatingChange::Dislike)
    }

    /// Adds one to the comment rating; returns the new value.
    pub fn like_comment(&self, id: CommentId) -> Result<i16, RatingServiceError> {
        self.change_comment(id, RatingChange::Like)
    }

    /// Subtracts one from the comment rating; returns the new value.
    pub fn dislike_comment(&self, id: CommentId) -> Result<i16, RatingServiceError> {
        self.change_comment(id, RatingChange::Dislike)
    }

    fn change_post(&self, id: PostId, change: RatingChange) -> Result<i16, RatingServiceError> {
        let started_at = Instant::now();
        let result = self
            .repo
            .in_write_transaction(|repo| -> Result<Rating, RatingServiceError> {
                let mut post = repo.get_post(id)?.ok_or(RatingServiceError::NotFound {
                    kind: EntityKind::Post,
                    id,
                })?;
                let rating = step(&mut post, change)?;
                repo.save_post(&post)?;
                Ok(rating)
            });
        log_rating_update(EntityKind::Post, id, change, started_at, &result);
        result.map(Rating::value)
    }

    fn change_comment(
        &self,
        id: CommentId,
        change: RatingChange,
    ) -> Result<i16, RatingServiceError> {
        let started_at = Instant::now();
        let result = self
            .repo
            .in_write_transaction(|repo| -> Result<Rating, RatingServiceError> {
                let mut comment = repo.get_comment(id)?.ok_or(RatingServiceError::NotFound {
                    kind: EntityKind::Comment,
                    id,
                })?;
                let rating = step(&mut comment, change)?;
                repo.save_comment(&comment)?;
                Ok(rating)
            });
        log_rating_update(EntityKind::Comment, id, change, started_at, &result);
        result.map(Rating::value)
    }
}

fn step<U: Rated>(unit: &mut U, change: RatingChange) -> Result<Rating, RatingOutOfRange> {
    let next = unit.rating().apply(change)?;
    unit.set_rating(next);
    Ok(next)
}

fn log_rating_update(
    kind: EntityKind,
    id: Uuid,
    change: RatingChange,
    started_at: Instant,
    result: &Result<Rating, RatingServiceError>,
) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(rating) => info!(
            "event=rating_update module=service status=ok kind={kind} id={id} change={} rating={rating} duration_ms={duration_ms}",
            change.as_str()
        ),
        Err(err) => error!(
            "event=rating_update module=service status=error kind={kind} id={id} change={} duration_ms={duration_ms} error={err}",
            change.as_str()
        ),
    }
}
