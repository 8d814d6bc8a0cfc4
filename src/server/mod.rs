pub mod access_log;
pub mod cors;
pub mod router;
pub mod routes;

use crate::config::Config;
use crate::db::ConnectionProvider;
use crate::error::FoodpilotError;
use axum::Router;
use router::{FoodpilotState, foodpilot_router};
use std::{future::Future, net::SocketAddr};
use tokio::{net::TcpListener, signal};
use tracing::info;

/// The process-wide application: one routing table and middleware chain.
///
/// Built once from the entrypoint and handed around by value; nothing looks it
/// up implicitly.
pub struct Application {
    router: Router,
    addr: SocketAddr,
}

impl Application {
    /// Validate configuration and construct the router. Fails only on invalid
    /// configuration; the database is not touched.
    pub fn build(cfg: &Config) -> Result<Self, FoodpilotError> {
        let state = FoodpilotState::new(ConnectionProvider::new(&cfg.database));
        let router = foodpilot_router(state, &cfg.cors)?;
        let addr = SocketAddr::from((cfg.basic.listen_addr, cfg.basic.listen_port));
        Ok(Self { router, addr })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Bind the configured address and serve until Ctrl+C or SIGTERM.
    pub async fn serve(self) -> Result<(), FoodpilotError> {
        let listener = TcpListener::bind(self.addr).await?;
        self.run(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn run<S>(self, listener: TcpListener, shutdown: S) -> Result<(), FoodpilotError>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        info!("HTTP server listening on {}", listener.local_addr()?);
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("Server has shut down gracefully.");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
