//! Pocketbank Core - state and presentation logic for a mobile banking demo
//!
//! This crate follows hexagonal architecture:
//!
//! - **domain**: Core entities and pure derivations (Session, CardInfo, header layout)
//! - **ports**: Trait definitions for external dependencies (AccountDataProvider, HapticFeedback)
//! - **services**: Application state and screen logic
//! - **adapters**: Concrete implementations (demo data, haptics)

pub mod adapters;
pub mod config;
pub mod domain;
mod log_migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::demo::DemoAccountData;
use config::Config;
use ports::{AccountDataProvider, HapticFeedback};
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{CardInfo, CardPresentation, CardStatus, CardVisualState, Credentials, Session, Transaction};

/// Main context for Pocketbank operations
///
/// Owns the single [`AuthSession`] of the app and hands it, along with the
/// data provider and logger, to each screen it builds.
pub struct PocketContext {
    pub config: Config,
    pub auth: Arc<AuthSession>,
    pub provider: Arc<dyn AccountDataProvider>,
    pub logger: Option<Arc<LoggingService>>,
}

impl PocketContext {
    /// Create a context backed by the demo provider, configured from `app_dir`
    pub fn new(app_dir: &Path, logger: Option<Arc<LoggingService>>) -> Result<Self> {
        let config = Config::load(app_dir)?;
        let provider: Arc<dyn AccountDataProvider> = Arc::new(DemoAccountData::from_config(&config));
        Ok(Self::with_provider(config, provider, logger))
    }

    /// Create a context with an explicit configuration and provider
    pub fn with_provider(
        config: Config,
        provider: Arc<dyn AccountDataProvider>,
        logger: Option<Arc<LoggingService>>,
    ) -> Self {
        let mut auth = AuthSession::new(config.sign_in_latency()).failing(config.demo.fail_sign_in);
        if let Some(l) = &logger {
            auth = auth.with_logger(Arc::clone(l));
        }
        Self {
            config,
            auth: Arc::new(auth),
            provider,
            logger,
        }
    }

    pub fn presentation(&self) -> CardPresentation {
        CardPresentation::new(self.config.screen_width)
    }

    /// Fresh login form
    pub fn login_form(&self) -> LoginForm {
        let form = LoginForm::new();
        match &self.logger {
            Some(l) => form.with_logger(Arc::clone(l)),
            None => form,
        }
    }

    /// Mount a new home screen: fresh scroll offset and fresh queries
    pub fn home_screen(&self, haptics: Arc<dyn HapticFeedback>) -> HomeScreen {
        let mut store = AccountDataStore::new(Arc::clone(&self.provider));
        if let Some(l) = &self.logger {
            store = store.with_logger(Arc::clone(l));
        }
        let home = HomeScreen::new(store, self.presentation(), haptics);
        match &self.logger {
            Some(l) => home.with_logger(Arc::clone(l)),
            None => home,
        }
    }

    /// Screen the current session allows, starting from `current`
    pub fn route(&self, current: Route) -> Route {
        router::resolve(&self.auth.snapshot(), current)
    }
}
