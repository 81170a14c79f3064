//! Configuration management
//!
//! Settings live in `settings.json` in the app directory:
//! ```json
//! {
//!   "app": { "screenWidth": 390, "signInLatencyMs": 2000, "fetchLatencyMs": 600, ... },
//!   "demo": { "failCard": false, "failTransactions": false }
//! }
//! ```
//! Keys this crate does not manage are preserved when saving.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SCREEN_WIDTH: f64 = 390.0;
pub const DEFAULT_SIGN_IN_LATENCY_MS: u64 = 2000;
pub const DEFAULT_FETCH_LATENCY_MS: u64 = 600;

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(default)]
    demo: DemoSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    screen_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sign_in_latency_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fetch_latency_ms: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Failure injection for the demo data provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoSettings {
    #[serde(default)]
    pub fail_card: bool,
    #[serde(default)]
    pub fail_transactions: bool,
    /// Reject every sign-in attempt, even with well-formed credentials
    #[serde(default)]
    pub fail_sign_in: bool,
}

/// Effective app values as they were when the config was loaded
#[derive(Debug, Clone, Copy, PartialEq)]
struct AppValues {
    screen_width: f64,
    sign_in_latency_ms: u64,
    fetch_latency_ms: u64,
}

impl Default for AppValues {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            sign_in_latency_ms: DEFAULT_SIGN_IN_LATENCY_MS,
            fetch_latency_ms: DEFAULT_FETCH_LATENCY_MS,
        }
    }
}

/// Pocketbank configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    /// Logical screen width the header layout is computed for
    pub screen_width: f64,
    pub sign_in_latency_ms: u64,
    pub fetch_latency_ms: u64,
    pub demo: DemoSettings,
    // Keep the raw settings for preservation when saving
    pub _raw_settings: SettingsFile,
    pub loaded: AppValues,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            sign_in_latency_ms: DEFAULT_SIGN_IN_LATENCY_MS,
            fetch_latency_ms: DEFAULT_FETCH_LATENCY_MS,
            demo: DemoSettings::default(),
            _raw_settings: SettingsFile::default(),
            loaded: AppValues::default(),
        }
    }
}

fn env_number<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    /// Load config from the app directory
    ///
    /// Environment variables override the file (for CI/testing):
    /// `POCKETBANK_SCREEN_WIDTH`, `POCKETBANK_SIGN_IN_LATENCY_MS`,
    /// `POCKETBANK_FETCH_LATENCY_MS`.
    pub fn load(app_dir: &Path) -> Result<Self> {
        let settings_path = app_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        let screen_width = env_number("POCKETBANK_SCREEN_WIDTH")
            .or(raw.app.screen_width)
            .filter(|w: &f64| w.is_finite() && *w > 0.0)
            .unwrap_or(DEFAULT_SCREEN_WIDTH);
        let sign_in_latency_ms = env_number("POCKETBANK_SIGN_IN_LATENCY_MS")
            .or(raw.app.sign_in_latency_ms)
            .unwrap_or(DEFAULT_SIGN_IN_LATENCY_MS);
        let fetch_latency_ms = env_number("POCKETBANK_FETCH_LATENCY_MS")
            .or(raw.app.fetch_latency_ms)
            .unwrap_or(DEFAULT_FETCH_LATENCY_MS);

        Ok(Self {
            screen_width,
            sign_in_latency_ms,
            fetch_latency_ms,
            demo: raw.demo,
            _raw_settings: raw,
            loaded: AppValues {
                screen_width,
                sign_in_latency_ms,
                fetch_latency_ms,
            },
        })
    }

    /// Save config to the app directory
    /// Preserves other settings that the CLI doesn't manage
    ///
    /// App values are written only when they changed since `load`, so
    /// environment overrides never end up in the file.
    pub fn save(&self, app_dir: &Path) -> Result<()> {
        let settings_path = app_dir.join("settings.json");

        // Load existing settings to preserve fields we don't manage
        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            self._raw_settings.clone()
        };

        if self.screen_width != self.loaded.screen_width {
            settings.app.screen_width = Some(self.screen_width);
        }
        if self.sign_in_latency_ms != self.loaded.sign_in_latency_ms {
            settings.app.sign_in_latency_ms = Some(self.sign_in_latency_ms);
        }
        if self.fetch_latency_ms != self.loaded.fetch_latency_ms {
            settings.app.fetch_latency_ms = Some(self.fetch_latency_ms);
        }
        settings.demo = self.demo;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    pub fn sign_in_latency(&self) -> Duration {
        Duration::from_millis(self.sign_in_latency_ms)
    }

    pub fn fetch_latency(&self) -> Duration {
        Duration::from_millis(self.fetch_latency_ms)
    }

    /// Config with no simulated latency, for tests and scripted runs
    pub fn instant() -> Self {
        Self {
            sign_in_latency_ms: 0,
            fetch_latency_ms: 0,
            ..Self::default()
        }
    }
}
