//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the example application router
//! - Wire up request tracing
//! - Serve on a listener until Ctrl+C

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::http::app::DemoApp;

/// HTTP server for the example application.
pub struct HttpServer {
    app: DemoApp,
    config: AppConfig,
}

impl HttpServer {
    /// Register the example routes with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let app = DemoApp::build(&config);
        Self { app, config }
    }

    /// Build the Axum router with all middleware layers.
    pub fn router(&self) -> Router {
        self.app.router().layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn app(&self) -> &DemoApp {
        &self.app
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
