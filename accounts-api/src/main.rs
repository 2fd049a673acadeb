//! # Accounts API Server
//!
//! Serves user accounts, keyed by national ID (rut), and their shipping
//! addresses over a JSON HTTP API.
//!
//! ## Usage
//!
//! ```bash
//! STORAGE_BACKEND=memory cargo run -p accounts-api
//! ```

use accounts_api::{
    app::{build_router, AppState},
    config::{Config, StorageConfig},
};
use accounts_shared::{
    db::{migrations::run_migrations, pool},
    repository::postgres::{PgAddressRepository, PgUserRepository},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!(
        "Accounts API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let bind_address = config.bind_address();

    let (state, db) = match config.storage.clone() {
        StorageConfig::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            (AppState::in_memory(config), None)
        }
        StorageConfig::Postgres {
            database,
            run_migrations: migrate,
        } => {
            let db = pool::create_pool(database).await?;

            if migrate {
                run_migrations(&db).await?;
            }

            let state = AppState::new(
                config,
                Arc::new(PgUserRepository::new(db.clone())),
                Arc::new(PgAddressRepository::new(db.clone())),
            );
            (state, Some(db))
        }
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(db) = db {
        pool::close_pool(db).await;
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Installs the global subscriber; `LOG_FORMAT=json` selects JSON output
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "accounts_api=debug,accounts_shared=debug,tower_http=debug".into()
    });

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
