use crate::cli::handlers::build_engine;
use crate::config::Config;
use crate::daemon::{DaemonServer, DaemonState};
use crate::storage::Stores;
use crate::watcher::RuntimeWatcher;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub async fn serve(config: Config) -> Result<()> {
    info!("Starting HomeGantry {}", env!("CARGO_PKG_VERSION"));

    let stores = Arc::new(Stores::open(&config.data_dir, config.default_settings()).await);
    let engine = Arc::new(build_engine(&config, stores.overrides.clone())?);
    let server = DaemonServer::bind(config.listen_addr()?).await?;

    let cancellation_token = CancellationToken::new();
    let watcher = RuntimeWatcher::new(
        engine.clone(),
        config.poll_interval(),
        config.backoff_options(),
    );
    let watcher_task = tokio::spawn(watcher.run(cancellation_token.clone()));
    let mut server_task = tokio::spawn(
        server.run(DaemonState::new(engine, stores), cancellation_token.clone()),
    );

    let outcome = tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                warn!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutting down");
            cancellation_token.cancel();
            server_task.await.context("HTTP server task failed")?
        }
        served = &mut server_task => served.context("HTTP server task failed")?,
    };

    cancellation_token.cancel();
    watcher_task.await.context("Watcher task failed")?;
    info!("Stopped");
    outcome
}
