//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - One pool per process, built at startup and shared by reference
//! - Articles are always returned with their author (JOIN, no N+1)
//! - Single-statement writes; no check-then-insert
//! - Soft deletion via `deleted_at`

pub mod migrations;
pub mod pool;
pub mod repos;
pub mod store;

pub use pool::{create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use sqlx::PgPool;
pub use repos::{ArticleRepo, DbError};
pub use store::ArticleStore;
