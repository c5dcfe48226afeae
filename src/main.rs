//! `todo-lifecycle` HTTP server.
//!
//! Reads configuration from the environment (and `.env`), selects the
//! `PostgreSQL` store when `DATABASE_URL` is set or the in-memory store
//! otherwise, starts the overdue sweep scheduler when enabled, and serves the
//! todo API until Ctrl-C.

use std::sync::Arc;

use mockable::DefaultClock;
use todo_lifecycle::{
    api,
    config::AppConfig,
    scheduling::OverdueSweepScheduler,
    telemetry,
    todo::{
        adapters::{memory::InMemoryTodoRepository, postgres::PostgresTodoRepository},
        ports::TodoRepository,
        services::TodoLifecycleService,
    },
};
use tokio::{net::TcpListener, sync::watch};
use tracing::{info, warn};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // A missing `.env` file is not an error.
    let _env_file = dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    telemetry::init_tracing(&config.log_filter)?;

    match config.database.url.clone() {
        Some(url) => {
            let max_connections = config.database.max_connections;
            let pool = tokio::task::spawn_blocking(move || {
                PostgresTodoRepository::build_pool(&url, max_connections)
            })
            .await??;
            let repository = PostgresTodoRepository::new(pool);
            repository.ensure_schema().await?;
            info!("using PostgreSQL todo store");
            serve(config, repository).await
        }
        None => {
            warn!("DATABASE_URL is not set, items are kept in memory only");
            serve(config, InMemoryTodoRepository::new()).await
        }
    }
}

async fn serve<R>(config: AppConfig, repository: R) -> Result<(), BoxError>
where
    R: TodoRepository + 'static,
{
    let service = Arc::new(TodoLifecycleService::new(
        Arc::new(repository),
        Arc::new(DefaultClock),
    ));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let scheduler = config.sweep.enabled.then(|| {
        OverdueSweepScheduler::new(Arc::clone(&service), config.sweep.interval).spawn(shutdown_rx)
    });

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!(%address, "todo API listening");

    axum::serve(listener, api::router(service))
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(error = %err, "failed to listen for shutdown signal");
            }
            info!("shutdown signal received");
        })
        .await?;

    // Receivers may already be gone when the scheduler is disabled.
    let _stopped = shutdown_tx.send(true);
    if let Some(handle) = scheduler {
        handle.await?;
    }
    Ok(())
}
