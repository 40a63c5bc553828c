//! crafted-server: article REST API
//!
//! Exposes article CRUD over HTTP, persists to PostgreSQL through sqlx,
//! and pushes a best-effort notification to a message queue on update.

pub mod db;
pub mod http;
pub mod messaging;
pub mod models;
pub mod service;

pub use db::create_pool;
pub use http::{build_router, run_server, AppState, ServerConfig};
pub use service::{ArticleService, ServiceError};
