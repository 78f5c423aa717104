//! Startup wiring: configuration, tracing, and backend selection.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use ink_config::{CacheBackend, InkConfig, LoggingConfig};
use ink_core::ports::Cache;
use ink_db::{InkDb, SqlCache, SqlContentStore};
use ink_http::ReqwestClient;
use ink_service::{ContentDataService, MemoryCache, StatusLogSubscriber};

use crate::AppState;
use crate::cli::Cli;

/// Load configuration and apply command-line overrides.
///
/// # Errors
///
/// Returns an error if a config source cannot be parsed or is invalid.
pub fn load_config(cli: &Cli) -> anyhow::Result<InkConfig> {
    let mut config =
        InkConfig::load_with_dotenv(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(host) = &cli.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    Ok(config)
}

/// Install the global tracing subscriber.
///
/// Filter precedence: `INK_LOG`, then `--quiet`/`--verbose`, then
/// `logging.filter` from config.
///
/// # Errors
///
/// Returns an error if a subscriber is already installed.
pub fn init_tracing(level_override: Option<&str>, logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("INK_LOG").unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(level_override.unwrap_or(&logging.filter))
    });

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}

/// Open the database and build the service with the configured backends.
///
/// # Errors
///
/// Returns an error if the database directory cannot be created, the
/// database cannot be opened, or the HTTP client cannot be built.
pub async fn build_state(config: &InkConfig) -> anyhow::Result<AppState> {
    if !config.database.is_in_memory()
        && let Some(parent) = Path::new(&config.database.path).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let db = Arc::new(
        InkDb::open_local(&config.database.path)
            .await
            .with_context(|| format!("failed to open database at {}", config.database.path))?,
    );
    let store = Arc::new(SqlContentStore::new(Arc::clone(&db)));

    let cache: Arc<dyn Cache> = match config.cache.backend {
        CacheBackend::Memory => Arc::new(MemoryCache::new()),
        CacheBackend::Database => Arc::new(SqlCache::new(db)),
    };

    let http = ReqwestClient::new(config.external.timeout()).context("failed to build HTTP client")?;

    let service = ContentDataService::new(
        store.clone(),
        store,
        cache,
        Arc::new(http),
        config.external.clone(),
    )
    .with_subscriber(Arc::new(StatusLogSubscriber));

    tracing::debug!(
        database = %config.database.path,
        cache = ?config.cache.backend,
        endpoint = %config.external.endpoint,
        "service ready"
    );
    Ok(AppState::new(service))
}
