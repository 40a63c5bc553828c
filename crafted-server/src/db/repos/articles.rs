//! Article repository
//!
//! - create: single CTE statement, INSERT + author JOIN (no partial writes)
//! - list/get: JOIN authors, skip soft-deleted rows
//! - delete: soft delete via `deleted_at`
//! - delete_all: unfiltered `deleted_at` stamp across the whole table

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::db::store::ArticleStore;
use crate::models::{Article, ArticleUpdate, Author, NewArticle};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("missing reference: {resource} '{id}'")]
    MissingReference { resource: &'static str, id: i64 },
}

const SELECT_ARTICLE: &str = r#"
    SELECT
        a.id,
        a.title,
        a.body,
        a.author_id,
        a.created_at,
        a.updated_at,
        u.nickname AS author_nickname,
        u.email AS author_email,
        u.created_at AS author_created_at,
        u.updated_at AS author_updated_at
    FROM articles a
    JOIN authors u ON u.id = a.author_id
"#;

/// Article repository backed by PostgreSQL
#[derive(Clone)]
pub struct ArticleRepo {
    pool: PgPool,
}

impl ArticleRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn article_from_row(row: &PgRow) -> Result<Article, sqlx::Error> {
    let author_id: i64 = row.try_get("author_id")?;
    Ok(Article {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        body: row.try_get("body")?,
        author_id,
        author: Author {
            id: author_id,
            nickname: row.try_get("author_nickname")?,
            email: row.try_get("author_email")?,
            created_at: row.try_get("author_created_at")?,
            updated_at: row.try_get("author_updated_at")?,
        },
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl ArticleStore for ArticleRepo {
    async fn list(&self) -> Result<Vec<Article>, DbError> {
        let sql = format!("{SELECT_ARTICLE} WHERE a.deleted_at IS NULL ORDER BY a.id");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let articles = rows
            .iter()
            .map(article_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(articles)
    }

    async fn create(&self, article: &NewArticle) -> Result<Article, DbError> {
        // Single statement: the insert and the author lookup commit together
        let row = sqlx::query(
            r#"
            WITH inserted AS (
                INSERT INTO articles (title, body, author_id)
                VALUES ($1, $2, $3)
                RETURNING id, title, body, author_id, created_at, updated_at
            )
            SELECT
                a.id,
                a.title,
                a.body,
                a.author_id,
                a.created_at,
                a.updated_at,
                u.nickname AS author_nickname,
                u.email AS author_email,
                u.created_at AS author_created_at,
                u.updated_at AS author_updated_at
            FROM inserted a
            JOIN authors u ON u.id = a.author_id
            "#,
        )
        .bind(article.title())
        .bind(article.body())
        .bind(article.author_id())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                DbError::MissingReference {
                    resource: "author",
                    id: article.author_id(),
                }
            }
            other => DbError::Sqlx(other),
        })?;

        Ok(article_from_row(&row)?)
    }

    async fn get(&self, id: i64) -> Result<Article, DbError> {
        let sql = format!("{SELECT_ARTICLE} WHERE a.id = $1 AND a.deleted_at IS NULL");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "article",
                id: id.to_string(),
            })?;

        Ok(article_from_row(&row)?)
    }

    async fn delete(&self, id: i64) -> Result<u64, DbError> {
        let result = sqlx::query(
            "UPDATE articles SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_all(&self) -> Result<u64, DbError> {
        // No WHERE clause: already-deleted rows are re-stamped and counted too
        let result = sqlx::query("UPDATE articles SET deleted_at = NOW()")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn update(&self, id: i64, update: &ArticleUpdate) -> Result<u64, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE articles
            SET title = $1,
                body = $2,
                updated_at = NOW()
            WHERE id = $3 AND deleted_at IS NULL
            "#,
        )
        .bind(update.title())
        .bind(update.body())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
