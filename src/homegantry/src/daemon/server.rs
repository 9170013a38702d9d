use crate::daemon::routes::ROUTES;
use crate::daemon::state::DaemonState;
use anyhow::{anyhow, Context, Result};
use axum::Router;
use std::future::IntoFuture;
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub fn get_router(state: DaemonState) -> Router {
    let mut router = Router::new();
    for (path, method_router) in ROUTES.iter() {
        router = router.route(path, method_router.clone());
    }
    router.with_state(state)
}

pub struct DaemonServer {
    listener: TcpListener,
}

impl DaemonServer {
    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        let listener = match TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
                return Err(anyhow!(
                    "Port {} is already in use; set HOMEGANTRY_PORT to another port",
                    addr.port()
                ));
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to bind to address {}", addr)),
        };
        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("Failed to read listener address")
    }

    /// Serves until the token is cancelled. Open SSE streams are dropped on shutdown.
    pub async fn run(self, state: DaemonState, cancellation_token: CancellationToken) -> Result<()> {
        let addr = self.local_addr()?;
        info!("Listening on http://{}", addr);

        let mut server = tokio::spawn(axum::serve(self.listener, get_router(state)).into_future());

        tokio::select! {
            _ = cancellation_token.cancelled() => {
                server.abort();
                info!("HTTP server stopped");
                Ok(())
            }
            result = &mut server => match result {
                Ok(served) => served.context("HTTP server failed"),
                Err(e) => Err(e).context("HTTP server task failed"),
            },
        }
    }
}
