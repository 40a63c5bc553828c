//! Article service
//!
//! Sits between the HTTP handlers and the store. Each operation is a single
//! awaited store call; input is validated before the store is touched, and
//! store failures are sorted into explicit error kinds.

use std::sync::Arc;

use crate::db::{ArticleStore, DbError};
use crate::messaging::Dispatcher;
use crate::models::{Article, ArticleUpdate, NewArticle, ValidationError};

/// Queue key announcing that an article was modified
pub const UPDATED_KEY: &str = "updated_at";

/// Error kinds surfaced by the service
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    #[error("author '{0}' does not exist")]
    UnknownAuthor(i64),

    #[error("store failure: {0}")]
    Store(DbError),
}

impl From<DbError> for ServiceError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::MissingReference { id, .. } => Self::UnknownAuthor(id),
            other => Self::Store(other),
        }
    }
}

/// Article operations over a shared store and dispatcher
#[derive(Clone)]
pub struct ArticleService {
    store: Arc<dyn ArticleStore>,
    dispatcher: Arc<dyn Dispatcher>,
}

impl ArticleService {
    pub fn new(store: Arc<dyn ArticleStore>, dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self { store, dispatcher }
    }

    /// All non-deleted articles, author loaded.
    pub async fn list(&self) -> Result<Vec<Article>, ServiceError> {
        Ok(self.store.list().await?)
    }

    /// Persist a validated article.
    pub async fn create(&self, article: NewArticle) -> Result<Article, ServiceError> {
        let created = self.store.create(&article).await?;
        tracing::info!(id = created.id, author_id = created.author_id, "article created");
        Ok(created)
    }

    /// Validate raw fields, then persist. Nothing is written on failure.
    pub async fn create_from(
        &self,
        title: &str,
        body: &str,
        author_id: i64,
    ) -> Result<Article, ServiceError> {
        let article = NewArticle::new(title, body, author_id)?;
        self.create(article).await
    }

    pub async fn get(&self, id: i64) -> Result<Article, ServiceError> {
        Ok(self.store.get(id).await?)
    }

    /// Soft-delete one article, returning rows affected (0 or 1).
    pub async fn delete(&self, id: i64) -> Result<u64, ServiceError> {
        let count = self.store.delete(id).await?;
        tracing::info!(id, count, "article delete");
        Ok(count)
    }

    /// Mark every article row deleted, returning rows affected.
    pub async fn delete_all(&self) -> Result<u64, ServiceError> {
        let count = self.store.delete_all().await?;
        tracing::warn!(count, "all articles marked deleted");
        Ok(count)
    }

    /// Replace title and body, returning rows affected.
    ///
    /// When the statement succeeds a notification carrying the id is sent in
    /// the background. Its outcome never changes the returned count.
    pub async fn update(&self, id: i64, update: ArticleUpdate) -> Result<u64, ServiceError> {
        let count = self.store.update(id, &update).await?;
        tracing::info!(id, count, "article update");
        self.notify_updated(id);
        Ok(count)
    }

    fn notify_updated(&self, id: i64) {
        let dispatcher = Arc::clone(&self.dispatcher);
        let value = id.to_string();
        tokio::spawn(async move {
            if let Err(e) = dispatcher.send(UPDATED_KEY, &value).await {
                tracing::warn!(error = %e, id = %value, "update notification failed");
            }
        });
    }
}
