//! Runs the task API server.
//!
//! Configuration comes from the environment, optionally seeded from a `.env`
//! file in the working directory:
//!
//! ```text
//! STORAGE_MODE=postgres DB_HOST=localhost DB_NAME=task_db PORT=5000 taskboard-server
//! ```
//!
//! With `STORAGE_MODE=postgres` the database and table are created when
//! missing. A failed bootstrap is logged and the server still starts; task
//! routes answer 500 until the database becomes reachable.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use mockable::DefaultClock;
use taskboard::config::{ServerConfig, StorageMode};
use taskboard::http::{AppState, router, serve, shutdown_signal};
use taskboard::task::adapters::{
    memory::InMemoryTaskRepository,
    postgres::{PostgresTaskRepository, bootstrap, build_pool},
};
use taskboard::task::ports::TaskRepository;
use tokio::net::TcpListener;
use tokio::runtime::Builder;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEFAULT_LOG_FILTER: &str = "taskboard=info,tower_http=info";

fn main() -> Result<(), BoxError> {
    load_dotenv()?;
    init_tracing();

    let config = ServerConfig::from_env()?;
    let runtime = Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(run(config))
}

fn load_dotenv() -> Result<(), dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(err),
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(config: ServerConfig) -> Result<(), BoxError> {
    let repository = open_repository(&config).await;
    let state = AppState::new(repository, Arc::new(DefaultClock));
    let app = router(state, &config.cors_origin);

    let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    let listener = TcpListener::bind(address).await?;
    serve(listener, app, shutdown_signal()).await?;
    Ok(())
}

async fn open_repository(config: &ServerConfig) -> Arc<dyn TaskRepository> {
    match config.storage {
        StorageMode::Memory => {
            warn!("using in-memory storage; tasks are lost on restart");
            Arc::new(InMemoryTaskRepository::new())
        }
        StorageMode::Postgres => {
            info!(database = ?config.database, "bootstrapping task store");
            let pool = match bootstrap(&config.database).await {
                Ok(pool) => pool,
                Err(err) => {
                    error!(error = %err, "task store bootstrap failed; serving without it");
                    build_pool(&config.database)
                }
            };
            Arc::new(PostgresTaskRepository::new(pool))
        }
    }
}
