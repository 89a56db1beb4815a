//! Posts: news items and articles written by authors.
//!
//! # Invariants
//! - `title` is non-blank and at most 128 characters.
//! - `kind` defaults to `PostKind::Article`.

use crate::model::author::AuthorId;
use crate::model::now_epoch_ms;
use crate::model::rating::{Rated, Rating};
use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type PostId = Uuid;

pub const TITLE_MAX_CHARS: usize = 128;
const PREVIEW_CHARS: usize = 123;

/// Publication kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostKind {
    News,
    #[default]
    Article,
}

impl PostKind {
    /// Two-letter code used in storage.
    pub fn code(self) -> &'static str {
        match self {
            Self::News => "NW",
            Self::Article => "AR",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "NW" => Some(Self::News),
            "AR" => Some(Self::Article),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author_id: AuthorId,
    pub kind: PostKind,
    pub title: String,
    pub body: String,
    pub rating: Rating,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Post {
    /// Creates an unrated article stamped with the current time.
    pub fn new(author_id: AuthorId, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            kind: PostKind::default(),
            title: title.into(),
            body: body.into(),
            rating: Rating::ZERO,
            created_at: now_epoch_ms(),
        }
    }

    pub fn with_kind(mut self, kind: PostKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title, TITLE_MAX_CHARS)
    }

    /// First 123 characters of the body followed by an ellipsis.
    pub fn preview(&self) -> String {
        let mut preview: String = self.body.chars().take(PREVIEW_CHARS).collect();
        preview.push_str("...");
        preview
    }
}

impl Rated for Post {
    fn rating(&self) -> Rating {
        self.rating
    }

    fn set_rating(&mut self, rating: Rating) {
        self.rating = rating;
    }
}
