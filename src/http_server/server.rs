//! # HTTP Server
//!
//! Serves a record log over HTTP.

use std::future::Future;
use std::io;

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::config::HttpServerConfig;
use super::health_routes::health_routes;
use super::log_routes::{log_routes, SharedLog};
use crate::observability::Event;

/// HTTP server for a record log
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server for `log` with the given configuration
    pub fn new(config: HttpServerConfig, log: SharedLog) -> Self {
        let router = Self::build_router(log);
        Self { config, router }
    }

    fn build_router(log: SharedLog) -> Router {
        Router::new()
            .merge(health_routes())
            .merge(log_routes(log))
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind the configured address and serve until Ctrl-C.
    pub async fn start(self) -> io::Result<()> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already-bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        info!(event = %Event::Serving, %addr, "record log API listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
    }
}

async fn shutdown_signal() {
    // If the handler cannot be installed, run until the process is killed
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    info!(event = %Event::ShutdownStart, "shutdown signal received");
}
