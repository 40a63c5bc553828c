//! RabbitMQ dispatcher over AMQP 0.9.1

use async_trait::async_trait;
use lapin::{
    options::{BasicPublishOptions, QueueDeclareOptions},
    types::FieldTable,
    BasicProperties, Channel, Connection, ConnectionProperties,
};

use super::{DispatchError, Dispatcher, Message};

/// Default queue that receives article notifications
pub const DEFAULT_QUEUE: &str = "crafted.articles";

/// AMQP connection settings
#[derive(Debug, Clone)]
pub struct AmqpConfig {
    /// AMQP connection URL (e.g., "amqp://localhost:5672/%2f")
    pub url: String,
    /// Queue name, also used as routing key on the default exchange
    pub queue: String,
}

impl AmqpConfig {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            queue: DEFAULT_QUEUE.to_string(),
        }
    }

    pub fn with_queue(mut self, queue: &str) -> Self {
        self.queue = queue.to_string();
        self
    }
}

/// Publishes JSON `{key, value}` messages to a durable queue.
///
/// Holds one connection and one channel for the life of the process.
pub struct AmqpDispatcher {
    // Dropping the connection closes the channel
    _connection: Connection,
    channel: Channel,
    queue: String,
}

impl AmqpDispatcher {
    /// Connect and declare the queue.
    pub async fn connect(config: AmqpConfig) -> Result<Self, DispatchError> {
        let connection =
            Connection::connect(&config.url, ConnectionProperties::default()).await?;
        let channel = connection.create_channel().await?;

        channel
            .queue_declare(
                &config.queue,
                QueueDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await?;

        tracing::info!(queue = %config.queue, "connected to message broker");

        Ok(Self {
            _connection: connection,
            channel,
            queue: config.queue,
        })
    }
}

#[async_trait]
impl Dispatcher for AmqpDispatcher {
    async fn send(&self, key: &str, value: &str) -> Result<(), DispatchError> {
        let payload = serde_json::to_vec(&Message { key, value })?;

        // Publisher confirm is not awaited
        self.channel
            .basic_publish(
                "",
                &self.queue,
                BasicPublishOptions::default(),
                &payload,
                BasicProperties::default().with_delivery_mode(2),
            )
            .await?;

        tracing::debug!(key, value, queue = %self.queue, "message published");
        Ok(())
    }
}
