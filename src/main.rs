//! Billing API server
//!
//! Configuration comes from `BILLING_CONFIG` (YAML) plus `BILLING_*`
//! environment overrides; log verbosity from `RUST_LOG`.

use anyhow::Result;
use billing::config::AppConfig;
use billing::server::ServerBuilder;
use billing::storage::Repositories;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;
    let repositories = Repositories::from_config(&config.storage).await?;

    ServerBuilder::new(config)
        .with_repositories(repositories)
        .serve()
        .await
}
