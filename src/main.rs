//! Bug report service with AI-suggested resolutions.
//!
//! Reports are submitted over HTTP and stored with a resolution suggested by
//! an external [semantic search or language model][api]. Resolutions can be
//! regenerated on demand. The AI services are expected to be reachable at the
//! [configured][config] base URLs; this process does not start them.

pub mod api;
pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod logging;
pub mod market;
pub mod routes;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use tracing::{error, info, warn};

use api::Resolver;
use config::Config;
use database::{BugStore, MemoryStore, MysqlStore};
use error::Error;
use routes::{router, AppState};

#[tokio::main]
async fn main() {
    logging::init_subscriber();

    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let config = Config::from_env()?;

    let mysql = config.database.as_ref().map(|db| {
        info!("Connecting to MySQL at {}:{}", db.server, db.port);
        MysqlStore::new(db)
    });
    let store: Arc<dyn BugStore> = match &mysql {
        Some(mysql) => {
            mysql.create_table().await?;
            Arc::new(mysql.clone())
        }
        None => {
            warn!("DB_SERVER is not set, bug reports are kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    // shared reqwest client for the AI services
    let client = reqwest::Client::builder()
        .use_rustls_tls()
        .timeout(config.ai.timeout)
        .build()?;
    let resolver = Resolver::new(client, &config.ai);
    info!(
        "Semantic search at {}, generation at {} (model {})",
        config.ai.search_url, config.ai.generate_url, config.ai.model
    );

    let app = router(Arc::new(AppState { store, resolver }), &config.cors_origin)?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(store) = mysql {
        store.disconnect().await?;
    }
    info!("Shut down cleanly");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Could not listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Could not listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
