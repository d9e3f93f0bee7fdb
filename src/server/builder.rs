//! ServerBuilder for fluent API to build HTTP servers

use super::router::build_router;
use super::state::AppState;
use crate::config::{AppConfig, StorageBackend};
use crate::storage::Repositories;
use anyhow::{Result, bail};
use axum::Router;
use tokio::net::TcpListener;

/// Builder for the billing HTTP server
///
/// # Example
///
/// ```ignore
/// let config = AppConfig::load()?;
/// let repositories = Repositories::from_config(&config.storage).await?;
///
/// ServerBuilder::new(config)
///     .with_repositories(repositories)
///     .serve()
///     .await?;
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    repositories: Option<Repositories>,
}

impl ServerBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            repositories: None,
        }
    }

    /// Set the repositories the use-cases run against
    ///
    /// Without this, `build` falls back to in-memory storage, which is only
    /// allowed when the configuration asks for it.
    pub fn with_repositories(mut self, repositories: Repositories) -> Self {
        self.repositories = Some(repositories);
        self
    }

    /// Build the router with every route and middleware attached
    pub fn build(self) -> Result<Router> {
        self.config.validate()?;

        let repositories = match self.repositories {
            Some(repositories) => repositories,
            None if self.config.storage.backend == StorageBackend::InMemory => {
                Repositories::in_memory()
            }
            None => bail!("No repositories provided for the configured storage backend"),
        };

        let state = AppState::new(&self.config, &repositories);
        Ok(build_router(state))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to `server.bind_addr`
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind_addr.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
