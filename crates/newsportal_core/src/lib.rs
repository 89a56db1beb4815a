//! Core domain logic for the news portal.
//!
//! Holds the rating counters on posts and comments, the author reputation
//! engine, and the SQLite content repository they run against.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, PortalConfig};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::author::{Account, AccountId, Author, AuthorId};
pub use model::category::{Category, CategoryId};
pub use model::comment::{Comment, CommentId};
pub use model::post::{Post, PostId, PostKind};
pub use model::rating::{Rated, Rating, RatingChange, RatingOutOfRange};
pub use model::reputation::{ReputationBreakdown, COMMENT_RATING_WEIGHT, POST_RATING_WEIGHT};
pub use model::validation::ValidationError;
pub use repo::content_repo::{
    CascadeReport, ContentRepository, EntityKind, RepoError, RepoResult, SqliteContentRepository,
};
pub use service::content_service::{ContentService, PublishPostRequest};
pub use service::rating_service::{RatingService, RatingServiceError};
pub use service::reputation_service::{ReputationService, ReputationServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
