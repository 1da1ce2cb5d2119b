mod api;
mod candidates;
mod config;
mod errors;
mod models;
mod repl;
mod session;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::ApiClient;
use crate::candidates::FixtureSource;
use crate::config::Config;
use crate::repl::Repl;
use crate::session::SessionController;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (aborts on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Outreach Console v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the outreach service client
    let api = Arc::new(ApiClient::new(
        config.base_url.clone(),
        config.access_key.clone(),
    ));
    info!("API client initialized (base: {})", config.base_url);

    // Candidate source: the built-in fixture roster
    let source = Arc::new(FixtureSource);

    let controller = SessionController::new(api, source, config);

    Repl::new(controller).run().await
}
