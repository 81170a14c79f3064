//! CLI command implementations

pub mod config;
pub mod home;
pub mod layout;
pub mod login;
pub mod logs;
pub mod transactions;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use pocketbank_core::adapters::demo::DemoAccountData;
use pocketbank_core::config::Config;
use pocketbank_core::ports::AccountDataProvider;
use pocketbank_core::services::{EntryPoint, LoggingService};
use pocketbank_core::PocketContext;

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<Arc<LoggingService>> {
    let app_dir = get_app_dir().ok()?;
    std::fs::create_dir_all(&app_dir).ok()?;
    LoggingService::new(&app_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))
        .ok()
        .map(Arc::new)
}

/// Get the pocketbank directory from environment or default
pub fn get_app_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("POCKETBANK_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(".pocketbank"))
}

/// Load the config from the app directory, creating the directory if needed
pub fn load_config() -> Result<Config> {
    let app_dir = get_app_dir()?;
    std::fs::create_dir_all(&app_dir)
        .with_context(|| format!("Failed to create pocketbank directory: {:?}", app_dir))?;
    Config::load(&app_dir).context("Failed to load settings")
}

/// Failure switches given on the command line, on top of the settings file
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoOverrides {
    pub fail_card: bool,
    pub fail_transactions: bool,
}

/// Build the application context over the demo provider
pub fn get_context(overrides: DemoOverrides) -> Result<PocketContext> {
    let mut config = load_config()?;
    config.demo.fail_card |= overrides.fail_card;
    config.demo.fail_transactions |= overrides.fail_transactions;

    let provider: Arc<dyn AccountDataProvider> = Arc::new(DemoAccountData::from_config(&config));
    Ok(PocketContext::with_provider(config, provider, get_logger()))
}

/// Run an async core operation to completion from a sync command
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start async runtime")?;
    Ok(runtime.block_on(future))
}
