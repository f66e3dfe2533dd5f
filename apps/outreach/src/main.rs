mod compose;
mod config;
mod errors;
mod gateway;
mod llm_client;
mod models;
mod repl;
mod session;
mod store;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::compose::{ComposeHandoff, SystemBrowser};
use crate::config::Config;
use crate::gateway::AiGateway;
use crate::llm_client::LlmClient;
use crate::session::Session;
use crate::store::{FileStorage, HistoryStore, ProfileStore, Storage};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging. Logs go to stderr so they stay out of the screens.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Outreach v{}", env!("CARGO_PKG_VERSION"));

    // Local persistence: a corrupt document stops startup instead of being overwritten
    let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(&config.data_dir)?);
    info!("Data directory: {}", config.data_dir.display());
    let profile = ProfileStore::load(storage.clone())?;
    let history = HistoryStore::load(storage)?;
    info!("Loaded profile and {} sent applications", history.entries().len());

    // Initialize LLM client
    let llm = LlmClient::new(
        config.gemini_api_key.clone(),
        config.gemini_api_base_url.clone(),
    )?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let gateway = AiGateway::new(Arc::new(llm), config.target_roles.clone());
    let compose = ComposeHandoff::new(config.mail_account_slot, Arc::new(SystemBrowser));

    let session = Session::new(profile, history, gateway, compose, config.location.clone());
    repl::run(session).await
}
