//! Shared fixtures: in-memory store and test dispatchers

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::mpsc;

use crafted_server::db::{ArticleStore, DbError};
use crafted_server::messaging::{DispatchError, Dispatcher};
use crafted_server::models::{Article, ArticleUpdate, Author, NewArticle};
use crafted_server::ArticleService;

struct Row {
    article: Article,
    deleted: bool,
}

/// In-memory `ArticleStore` with soft-delete semantics matching Postgres.
#[derive(Default)]
pub struct MemoryStore {
    authors: Vec<Author>,
    rows: Mutex<Vec<Row>>,
}

impl MemoryStore {
    pub fn with_authors(ids: &[i64]) -> Self {
        let now = Utc::now();
        let authors = ids
            .iter()
            .map(|&id| Author {
                id,
                nickname: format!("author-{id}"),
                email: format!("author-{id}@example.com"),
                created_at: now,
                updated_at: now,
            })
            .collect();
        Self {
            authors,
            rows: Mutex::new(Vec::new()),
        }
    }

    /// Physical row count, deleted rows included.
    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Article>, DbError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|r| !r.deleted)
            .map(|r| r.article.clone())
            .collect())
    }

    async fn create(&self, article: &NewArticle) -> Result<Article, DbError> {
        let author = self
            .authors
            .iter()
            .find(|a| a.id == article.author_id())
            .cloned()
            .ok_or_else(|| DbError::MissingReference {
                resource: "author",
                id: article.author_id(),
            })?;

        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now();
        let stored = Article {
            id: rows.len() as i64 + 1,
            title: article.title().to_owned(),
            body: article.body().to_owned(),
            author_id: author.id,
            author,
            created_at: now,
            updated_at: now,
        };
        rows.push(Row {
            article: stored.clone(),
            deleted: false,
        });
        Ok(stored)
    }

    async fn get(&self, id: i64) -> Result<Article, DbError> {
        let rows = self.rows.lock().unwrap();
        rows.iter()
            .find(|r| r.article.id == id && !r.deleted)
            .map(|r| r.article.clone())
            .ok_or_else(|| DbError::NotFound {
                resource: "article",
                id: id.to_string(),
            })
    }

    async fn delete(&self, id: i64) -> Result<u64, DbError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| r.article.id == id && !r.deleted) {
            Some(row) => {
                row.deleted = true;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_all(&self) -> Result<u64, DbError> {
        let mut rows = self.rows.lock().unwrap();
        for row in rows.iter_mut() {
            row.deleted = true;
        }
        Ok(rows.len() as u64)
    }

    async fn update(&self, id: i64, update: &ArticleUpdate) -> Result<u64, DbError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| r.article.id == id && !r.deleted) {
            Some(row) => {
                row.article.title = update.title().to_owned();
                row.article.body = update.body().to_owned();
                row.article.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

/// Store whose every call fails like an unreachable database.
pub struct UnreachableStore;

#[async_trait]
impl ArticleStore for UnreachableStore {
    async fn list(&self) -> Result<Vec<Article>, DbError> {
        Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
    }

    async fn create(&self, _: &NewArticle) -> Result<Article, DbError> {
        Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
    }

    async fn get(&self, _: i64) -> Result<Article, DbError> {
        Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, _: i64) -> Result<u64, DbError> {
        Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
    }

    async fn delete_all(&self) -> Result<u64, DbError> {
        Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
    }

    async fn update(&self, _: i64, _: &ArticleUpdate) -> Result<u64, DbError> {
        Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
    }
}

/// Forwards every sent message to a channel the test can await.
pub struct RecordingDispatcher {
    tx: mpsc::UnboundedSender<(String, String)>,
}

impl RecordingDispatcher {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(String, String)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl Dispatcher for RecordingDispatcher {
    async fn send(&self, key: &str, value: &str) -> Result<(), DispatchError> {
        let _ = self.tx.send((key.to_owned(), value.to_owned()));
        Ok(())
    }
}

/// Dispatcher that always fails, as with a dead broker.
pub struct BrokenDispatcher;

#[async_trait]
impl Dispatcher for BrokenDispatcher {
    async fn send(&self, _: &str, _: &str) -> Result<(), DispatchError> {
        Err(DispatchError::Json(serde_json::Error::io(std::io::Error::other(
            "broker unreachable",
        ))))
    }
}

/// Service over a memory store seeded with author 1, plus the
/// receiving end of its notifications.
pub fn memory_service() -> (
    ArticleService,
    Arc<MemoryStore>,
    mpsc::UnboundedReceiver<(String, String)>,
) {
    let store = Arc::new(MemoryStore::with_authors(&[1]));
    let (dispatcher, rx) = RecordingDispatcher::new();
    let service = ArticleService::new(store.clone(), Arc::new(dispatcher));
    (service, store, rx)
}
