//! Article and author entities, plus validated article input
//!
//! Input is trimmed and checked at construction, so a `NewArticle` or
//! `ArticleUpdate` that exists is always safe to persist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Maximum length for article titles (matches the VARCHAR(255) column)
pub const MAX_TITLE_LEN: usize = 255;

/// Author record, loaded alongside every article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub nickname: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stored article with its author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub author_id: i64,
    pub author: Author,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating an article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    title: String,
    body: String,
    author_id: i64,
}

impl NewArticle {
    /// Build a new article, trimming title and body.
    ///
    /// # Rules
    /// - Title and body must be non-empty after trimming
    /// - Title is at most 255 characters
    /// - Author id must be positive
    pub fn new(title: &str, body: &str, author_id: i64) -> Result<Self, ValidationError> {
        let (title, body) = prepare(title, body)?;

        if author_id < 1 {
            return Err(ValidationError::InvalidFormat {
                field: "author_id",
                reason: "must reference an existing author",
            });
        }

        Ok(Self {
            title,
            body,
            author_id,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn author_id(&self) -> i64 {
        self.author_id
    }
}

/// Validated replacement title/body for an existing article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleUpdate {
    title: String,
    body: String,
}

impl ArticleUpdate {
    pub fn new(title: &str, body: &str) -> Result<Self, ValidationError> {
        let (title, body) = prepare(title, body)?;
        Ok(Self { title, body })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

fn prepare(title: &str, body: &str) -> Result<(String, String), ValidationError> {
    let title = title.trim();
    let body = body.trim();

    if title.is_empty() {
        return Err(ValidationError::Empty { field: "title" });
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title",
            max: MAX_TITLE_LEN,
        });
    }

    if body.is_empty() {
        return Err(ValidationError::Empty { field: "body" });
    }

    Ok((title.to_owned(), body.to_owned()))
}
