//! Article endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ArticleId};
use crate::http::server::AppState;
use crate::models::{Article, ArticleUpdate, Author};

/// Create article request. Missing fields fall through to validation.
#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub author_id: i64,
}

/// Update article request
#[derive(Debug, Deserialize)]
pub struct UpdateArticleRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    pub id: i64,
    pub nickname: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Author> for AuthorResponse {
    fn from(a: Author) -> Self {
        Self {
            id: a.id,
            nickname: a.nickname,
            email: a.email,
            created_at: a.created_at.to_rfc3339(),
            updated_at: a.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub author_id: i64,
    pub author: AuthorResponse,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Article> for ArticleResponse {
    fn from(a: Article) -> Self {
        Self {
            id: a.id,
            title: a.title,
            body: a.body,
            author_id: a.author_id,
            author: AuthorResponse::from(a.author),
            created_at: a.created_at.to_rfc3339(),
            updated_at: a.updated_at.to_rfc3339(),
        }
    }
}

/// Row-count acknowledgement, e.g. `{"status": "OK 3 Records Deleted!"}`
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    fn deleted(count: u64) -> Self {
        Self {
            status: format!("OK {} Records Deleted!", count),
        }
    }

    fn updated(count: u64) -> Self {
        Self {
            status: format!("OK {} Records Updated!", count),
        }
    }
}

/// GET /articles
async fn list_articles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ArticleResponse>>, ApiError> {
    let articles = state.articles.list().await?;
    Ok(Json(articles.into_iter().map(ArticleResponse::from).collect()))
}

/// POST /articles
async fn create_article(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateArticleRequest>,
) -> Result<(StatusCode, Json<ArticleResponse>), ApiError> {
    let article = state
        .articles
        .create_from(&req.title, &req.body, req.author_id)
        .await?;

    Ok((StatusCode::CREATED, Json(ArticleResponse::from(article))))
}

/// DELETE /articles - marks every article deleted
async fn delete_all_articles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let count = state.articles.delete_all().await?;
    Ok(Json(StatusResponse::deleted(count)))
}

/// GET /articles/{id}
async fn get_article(
    State(state): State<Arc<AppState>>,
    ArticleId(id): ArticleId,
) -> Result<Json<ArticleResponse>, ApiError> {
    let article = state.articles.get(id).await?;
    Ok(Json(ArticleResponse::from(article)))
}

/// PUT /articles/{id}
async fn update_article(
    State(state): State<Arc<AppState>>,
    ArticleId(id): ArticleId,
    ApiJson(req): ApiJson<UpdateArticleRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let update = ArticleUpdate::new(&req.title, &req.body)?;
    let count = state.articles.update(id, update).await?;
    Ok(Json(StatusResponse::updated(count)))
}

/// DELETE /articles/{id}
async fn delete_article(
    State(state): State<Arc<AppState>>,
    ArticleId(id): ArticleId,
) -> Result<Json<StatusResponse>, ApiError> {
    let count = state.articles.delete(id).await?;
    Ok(Json(StatusResponse::deleted(count)))
}

/// Article routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/articles",
            get(list_articles)
                .post(create_article)
                .delete(delete_all_articles),
        )
        .route(
            "/articles/{id}",
            get(get_article).put(update_article).delete(delete_article),
        )
}
