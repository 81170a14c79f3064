//! Pocketbank CLI - a demo banking app in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{config, home, layout, login, logs, transactions};

/// Pocketbank - a demo banking app in your terminal
#[derive(Parser)]
#[command(name = "pb", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in interactively and open the home screen
    Login {
        /// Prefill the email instead of prompting for it
        #[arg(long)]
        email: Option<String>,
        /// Echo the typed password instead of masking it
        #[arg(long)]
        show_password: bool,
        /// Make the card query fail
        #[arg(long)]
        fail_card: bool,
        /// Make the transactions query fail
        #[arg(long)]
        fail_transactions: bool,
    },

    /// Sign in with the given credentials and print the home screen
    Home {
        #[arg(long, env = "POCKETBANK_EMAIL")]
        email: Option<String>,
        #[arg(long, env = "POCKETBANK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Scroll offsets to lay the header out at (comma separated)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        scroll: Vec<f64>,
        /// Press an account action (top-up, exchange, transfer, details)
        #[arg(long)]
        action: Option<String>,
        /// Pull to refresh after the first load
        #[arg(long)]
        refresh: bool,
        /// Number of transactions to show
        #[arg(short, long, default_value_t = home::DEFAULT_LIMIT)]
        limit: usize,
        /// Make the card query fail
        #[arg(long)]
        fail_card: bool,
        /// Make the transactions query fail
        #[arg(long)]
        fail_transactions: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the header layout for a set of scroll offsets
    Layout {
        /// Scroll offsets (comma separated)
        #[arg(
            long,
            value_delimiter = ',',
            allow_hyphen_values = true,
            default_value = "0,25,50,100,150,200"
        )]
        offsets: Vec<f64>,
        /// Card query status to lay out for
        #[arg(long, value_enum, default_value = "ready")]
        status: layout::StatusArg,
        /// Screen width (defaults to the configured width)
        #[arg(long)]
        width: Option<f64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List transactions and credits, newest first
    Transactions {
        /// Number of entries to show
        #[arg(short, long, default_value = "30")]
        limit: usize,
        /// Only show credits
        #[arg(long)]
        credits: bool,
        /// Make the transactions query fail
        #[arg(long)]
        fail: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login {
            email,
            show_password,
            fail_card,
            fail_transactions,
        } => login::run(email, show_password, fail_card, fail_transactions),
        Commands::Home {
            email,
            password,
            scroll,
            action,
            refresh,
            limit,
            fail_card,
            fail_transactions,
            json,
        } => home::run(home::HomeArgs {
            email,
            password,
            scroll,
            action,
            refresh,
            limit,
            fail_card,
            fail_transactions,
            json,
        }),
        Commands::Layout { offsets, status, width, json } => layout::run(offsets, status, width, json),
        Commands::Transactions { limit, credits, fail, json } => {
            transactions::run(limit, credits, fail, json)
        }
        Commands::Config { command } => config::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
