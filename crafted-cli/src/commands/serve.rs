//! HTTP server command for the article API

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use crafted_server::db::{migrations, ArticleRepo};
use crafted_server::messaging::{AmqpConfig, AmqpDispatcher, Dispatcher, LogDispatcher, DEFAULT_QUEUE};
use crafted_server::{run_server, AppState, ArticleService, ServerConfig};

use super::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "CRAFTED_BIND", default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    #[command(flatten)]
    pub db: DatabaseArgs,

    /// Skip schema setup on startup
    #[arg(long)]
    pub no_migrate: bool,

    /// AMQP broker URL for update notifications (logged only when unset)
    #[arg(long, env = "AMQP_URL")]
    pub amqp_url: Option<String>,

    /// Queue receiving update notifications
    #[arg(long, env = "CRAFTED_QUEUE", default_value = DEFAULT_QUEUE)]
    pub queue: String,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting crafted server on {}", args.bind);

    let pool = args.db.connect().await?;

    if !args.no_migrate {
        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    let dispatcher: Arc<dyn Dispatcher> = match &args.amqp_url {
        Some(url) => {
            let config = AmqpConfig::new(url).with_queue(&args.queue);
            Arc::new(
                AmqpDispatcher::connect(config)
                    .await
                    .context("Failed to connect to message broker")?,
            )
        }
        None => {
            tracing::warn!("AMQP_URL not set; update notifications will only be logged");
            Arc::new(LogDispatcher)
        }
    };

    let service = ArticleService::new(Arc::new(ArticleRepo::new(pool)), dispatcher);
    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Blocks until shutdown
    run_server(AppState::new(service), config)
        .await
        .context("Server error")?;

    Ok(())
}
