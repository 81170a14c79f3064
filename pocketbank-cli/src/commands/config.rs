//! Config command - show and change settings.json

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;

use super::{get_app_dir, load_config};
use crate::output;
use pocketbank_core::config::Config;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change one setting
    Set {
        /// screen-width, sign-in-latency-ms, fetch-latency-ms,
        /// demo.fail-card, demo.fail-transactions or demo.fail-sign-in
        key: String,
        value: String,
    },
    /// Print the settings file path
    Path,
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => anyhow::bail!("Expected true or false, got '{}'", value),
    }
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "screen-width" => {
            let width: f64 = value.parse().context("Screen width must be a number")?;
            if !width.is_finite() || width <= 0.0 {
                anyhow::bail!("Screen width must be positive");
            }
            config.screen_width = width;
        }
        "sign-in-latency-ms" => {
            config.sign_in_latency_ms = value.parse().context("Latency must be whole milliseconds")?;
        }
        "fetch-latency-ms" => {
            config.fetch_latency_ms = value.parse().context("Latency must be whole milliseconds")?;
        }
        "demo.fail-card" => config.demo.fail_card = parse_bool(value)?,
        "demo.fail-transactions" => config.demo.fail_transactions = parse_bool(value)?,
        "demo.fail-sign-in" => config.demo.fail_sign_in = parse_bool(value)?,
        _ => anyhow::bail!("Unknown setting '{}'", key),
    }
    Ok(())
}

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show { json } => {
            let config = load_config()?;
            if json {
                let value = serde_json::json!({
                    "screenWidth": config.screen_width,
                    "signInLatencyMs": config.sign_in_latency_ms,
                    "fetchLatencyMs": config.fetch_latency_ms,
                    "demo": config.demo,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
                return Ok(());
            }

            println!("{}", "Settings".bold());
            let mut table = output::create_table();
            table.add_row(vec!["screen-width".to_string(), config.screen_width.to_string()]);
            table.add_row(vec!["sign-in-latency-ms".to_string(), config.sign_in_latency_ms.to_string()]);
            table.add_row(vec!["fetch-latency-ms".to_string(), config.fetch_latency_ms.to_string()]);
            table.add_row(vec!["demo.fail-card".to_string(), config.demo.fail_card.to_string()]);
            table.add_row(vec![
                "demo.fail-transactions".to_string(),
                config.demo.fail_transactions.to_string(),
            ]);
            table.add_row(vec!["demo.fail-sign-in".to_string(), config.demo.fail_sign_in.to_string()]);
            println!("{}", table);
        }
        ConfigCommands::Set { key, value } => {
            let mut config = load_config()?;
            apply(&mut config, &key, &value)?;
            config.save(&get_app_dir()?)?;
            output::success(&format!("Set {} = {}", key, value));
        }
        ConfigCommands::Path => {
            println!("{}", get_app_dir()?.join("settings.json").display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_known_keys() {
        let mut config = Config::default();
        apply(&mut config, "screen-width", "414").unwrap();
        apply(&mut config, "demo.fail-card", "on").unwrap();
        apply(&mut config, "demo.fail-sign-in", "yes").unwrap();
        assert_eq!(config.screen_width, 414.0);
        assert!(config.demo.fail_card);
        assert!(config.demo.fail_sign_in);
    }

    #[test]
    fn test_apply_rejects_bad_values() {
        let mut config = Config::default();
        assert!(apply(&mut config, "screen-width", "-3").is_err());
        assert!(apply(&mut config, "sign-in-latency-ms", "fast").is_err());
        assert!(apply(&mut config, "theme", "dark").is_err());
    }
}
