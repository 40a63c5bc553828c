//! Storage seam for the article service
//!
//! `ArticleRepo` is the PostgreSQL implementation. Tests plug in an
//! in-memory store behind the same trait.

use async_trait::async_trait;

use super::DbError;
use crate::models::{Article, ArticleUpdate, NewArticle};

/// Persistence operations for articles.
///
/// Every method is one round trip to the backing store. Counts are rows
/// affected by the statement.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// All non-deleted articles ordered by id, author loaded.
    async fn list(&self) -> Result<Vec<Article>, DbError>;

    /// Insert an article and return it with its generated id and author.
    async fn create(&self, article: &NewArticle) -> Result<Article, DbError>;

    /// Fetch a non-deleted article, or `DbError::NotFound`.
    async fn get(&self, id: i64) -> Result<Article, DbError>;

    /// Soft-delete one article.
    async fn delete(&self, id: i64) -> Result<u64, DbError>;

    /// Stamp `deleted_at` on every article row, with no filter.
    async fn delete_all(&self) -> Result<u64, DbError>;

    /// Replace title and body of a non-deleted article.
    async fn update(&self, id: i64, update: &ArticleUpdate) -> Result<u64, DbError>;
}
