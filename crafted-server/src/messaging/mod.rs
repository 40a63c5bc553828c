//! Outbound notifications
//!
//! A `Dispatcher` pushes a key/value pair to an external queue. Delivery is
//! best-effort: callers fire and forget, and failures are only logged.

pub mod amqp;

use async_trait::async_trait;
use serde::Serialize;

pub use amqp::{AmqpConfig, AmqpDispatcher, DEFAULT_QUEUE};

/// Error while publishing a message
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("broker error: {0}")]
    Broker(#[from] lapin::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Wire shape of a queued message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// Trait for message submission (testable)
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn send(&self, key: &str, value: &str) -> Result<(), DispatchError>;
}

/// Dispatcher used when no broker is configured; logs and succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDispatcher;

#[async_trait]
impl Dispatcher for LogDispatcher {
    async fn send(&self, key: &str, value: &str) -> Result<(), DispatchError> {
        tracing::info!(key, value, "notification (no broker configured)");
        Ok(())
    }
}
