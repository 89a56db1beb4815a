//! Author reputation recomputation.
//!
//! # Responsibility
//! - Recompute an author's score from the current ratings of their posts
//!   and of the comments their account wrote.
//! - Persist the score onto the author record (full overwrite).
//!
//! # Invariants
//! - Authors with no posts or no comments score the other part alone; an
//!   empty set is never an error.
//! - Reads and the single author save share one write transaction.
//! - Recomputation runs only when called; nothing here reacts to likes.

use crate::model::author::AuthorId;
use crate::model::reputation::ReputationBreakdown;
use crate::repo::content_repo::{ContentRepository, EntityKind, RepoError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Errors from reputation use-cases.
#[derive(Debug)]
pub enum ReputationServiceError {
    /// Target author does not exist.
    AuthorNotFound(AuthorId),
    /// Persistence-layer failure, surfaced unchanged.
    Repo(RepoError),
}

impl Display for ReputationServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthorNotFound(id) => write!(f, "author not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReputationServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AuthorNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ReputationServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                kind: EntityKind::Author,
                id,
            } => Self::AuthorNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Aggregation engine over a content repository.
pub struct ReputationService<R: ContentRepository> {
    repo: R,
}

impl<R: ContentRepository> ReputationService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Recomputes and stores the author's score; returns the new score.
    pub fn recompute_reputation(&self, author_id: AuthorId) -> Result<i64, ReputationServiceError> {
        self.recompute_breakdown(author_id)
            .map(|breakdown| breakdown.score)
    }

    /// Same as `recompute_reputation`, also returning the summed inputs.
    pub fn recompute_breakdown(
        &self,
        author_id: AuthorId,
    ) -> Result<ReputationBreakdown, ReputationServiceError> {
        let started_at = Instant::now();
        let result = self.repo.in_write_transaction(
            |repo| -> Result<ReputationBreakdown, ReputationServiceError> {
                let mut author = repo
                    .get_author(author_id)?
                    .ok_or(ReputationServiceError::AuthorNotFound(author_id))?;
                let posts = repo.find_posts_by_author(author.id)?;
                let comments = repo.find_comments_by_account(author.account_id)?;

                let breakdown = ReputationBreakdown::compute(&posts, &comments);
                author.reputation_score = breakdown.score;
                repo.save_author(&author)?;
                Ok(breakdown)
            },
        );

        let duration_ms = started_at.elapsed().as_millis();
        match &result {
            Ok(breakdown) => info!(
                "event=reputation_recompute module=service status=ok author_id={author_id} posts={} post_sum={} comments={} comment_sum={} score={} duration_ms={duration_ms}",
                breakdown.post_count,
                breakdown.post_rating_sum,
                breakdown.comment_count,
                breakdown.comment_rating_sum,
                breakdown.score
            ),
            Err(err) => error!(
                "event=reputation_recompute module=service status=error author_id={author_id} duration_ms={duration_ms} error={err}"
            ),
        }
        result
    }

    /// Recomputes every author in one transaction.
    ///
    /// Returns `(author_id, score)` pairs in repository order.
    pub fn recompute_all(&self) -> Result<Vec<(AuthorId, i64)>, ReputationServiceError> {
        self.repo
            .in_write_transaction(|repo| -> Result<Vec<(AuthorId, i64)>, ReputationServiceError> {
                let authors = repo.list_authors()?;
                let mut scores = Vec::with_capacity(authors.len());
                for author in authors {
                    scores.push((author.id, self.recompute_reputation(author.id)?));
                }
                Ok(scores)
            })
    }

    /// Returns the cached score without recomputing it.
    pub fn cached_reputation(&self, author_id: AuthorId) -> Result<i64, ReputationServiceError> {
        self.repo
            .get_author(author_id)?
            .map(|author| author.reputation_score)
            .ok_or(ReputationServiceError::AuthorNotFound(author_id))
    }
}
