//! Core tag domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{database_id::DatabaseId, form::required_text};

pub(crate) const TAG_NAME_REQUIRED: &str = "Tag name is required";

/// A validated, non-empty tag name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct TagName(String);

impl TagName {
    /// Create a tag name from `name` with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// Returns the message "Tag name is required" if `name` is empty or
    /// only whitespace.
    pub fn new(name: &str) -> Result<Self, &'static str> {
        required_text(name, TAG_NAME_REQUIRED).map(Self)
    }

    /// Create a tag name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for TagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for a tag.
pub type TagId = DatabaseId;

/// A label attached to any number of expenses (e.g., 'Holiday', 'Work').
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Tag {
    /// The ID of the tag.
    pub id: TagId,
    /// The display name.
    pub name: TagName,
    /// When the tag was created, used to order listings.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
