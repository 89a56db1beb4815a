//! Post categories.

use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CategoryId = Uuid;

pub const CATEGORY_NAME_MAX_CHARS: usize = 64;

/// Named category. Names are unique regardless of ASCII case; letters
/// outside ASCII compare exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    /// Creates a category with surrounding whitespace trimmed from `name`.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.as_ref().trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("category name", &self.name, CATEGORY_NAME_MAX_CHARS)
    }
}
