//! Home command - sign in and render the home screen

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;

use super::{block_on, get_context, layout, login, DemoOverrides};
use crate::output;
use pocketbank_core::adapters::haptics::{NoopHaptics, TerminalBell};
use pocketbank_core::domain::CardStatus;
use pocketbank_core::ports::HapticFeedback;
use pocketbank_core::services::{AccountAction, HomeScreen, HomeSnapshot, Route, SubmitOutcome};
use pocketbank_core::{OperationResult, PocketContext, Transaction};

pub const DEFAULT_LIMIT: usize = 15;

pub struct HomeArgs {
    pub email: Option<String>,
    pub password: Option<String>,
    pub scroll: Vec<f64>,
    pub action: Option<String>,
    pub refresh: bool,
    pub limit: usize,
    pub fail_card: bool,
    pub fail_transactions: bool,
    pub json: bool,
}

/// Mount fetch with a spinner
pub fn load(home: &HomeScreen, quiet: bool) -> Result<()> {
    let pb = output::spinner("Loading account...", quiet)?;
    block_on(home.mount())?;
    pb.finish_and_clear();
    Ok(())
}

pub fn run(args: HomeArgs) -> Result<()> {
    let ctx = get_context(DemoOverrides {
        fail_card: args.fail_card,
        fail_transactions: args.fail_transactions,
    })?;

    if ctx.route(Route::Home) == Route::Login {
        let (Some(email), Some(password)) = (args.email, args.password) else {
            anyhow::bail!("Not signed in. Run 'pb login' or pass --email and --password");
        };
        let mut form = ctx.login_form();
        form.set_email(email);
        form.set_password(password);

        if login::submit(&ctx, &mut form, args.json)? != SubmitOutcome::SignedIn {
            if !args.json {
                login::print_field_errors(&form);
            }
            anyhow::bail!("Sign-in failed");
        }
    }

    // No bell when the output is meant for another program
    let haptics: Arc<dyn HapticFeedback> = if args.json {
        Arc::new(NoopHaptics)
    } else {
        Arc::new(TerminalBell)
    };
    let home = ctx.home_screen(haptics);
    load(&home, args.json)?;

    if args.refresh {
        let pb = output::spinner("Refreshing...", args.json)?;
        block_on(home.pull_to_refresh())?;
        pb.finish_and_clear();
    }

    let mut pressed = None;
    if let Some(id) = args.action.as_deref() {
        let action = AccountAction::from_id(id).ok_or_else(|| {
            anyhow::anyhow!("Unknown action '{}'. Use top-up, exchange, transfer or details", id)
        })?;
        pressed = Some((action, home.press_action(action)));
    }

    let offsets = if args.scroll.is_empty() { vec![0.0] } else { args.scroll };

    if args.json {
        let snapshots: Vec<HomeSnapshot> = offsets
            .iter()
            .map(|&offset| {
                home.on_scroll(offset);
                home.snapshot()
            })
            .collect();
        let mut result = OperationResult::ok(snapshots);
        if let Some((action, enabled)) = pressed {
            result = result.with_context(
                "action",
                serde_json::json!({ "id": action.id(), "accepted": enabled }),
            );
        }
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if let Some(&last) = offsets.last() {
        home.on_scroll(last);
    }
    render(&ctx, &home, &offsets, args.limit);

    if let Some((action, enabled)) = pressed {
        if enabled {
            output::info(&format!("{} pressed", action.label()));
        } else {
            output::warning("Actions are unavailable until the card loads.");
        }
    }
    Ok(())
}

/// Print the card, the action row, the header layout at each offset and the
/// most recent transactions
pub fn render(ctx: &PocketContext, home: &HomeScreen, offsets: &[f64], limit: usize) {
    let snapshot = home.snapshot();
    let session = ctx.auth.snapshot();

    println!();
    if let Some(email) = session.email() {
        println!("{} {}", "Pocketbank".bold(), format!("· {}", email).dimmed());
    }

    render_card(&snapshot);
    render_actions(&snapshot);

    let presentation = ctx.presentation();
    let rows: Vec<_> = offsets
        .iter()
        .map(|&offset| (offset, presentation.style(offset, snapshot.card_status)))
        .collect();
    println!("{}", layout::style_table(&rows));

    render_transactions(&snapshot, limit);
}

fn render_card(snapshot: &HomeSnapshot) {
    match (snapshot.card_status, &snapshot.card.data) {
        (CardStatus::Failed, _) => {
            let err = snapshot.card.error.as_deref().unwrap_or("Unknown error");
            output::error(&format!("Card unavailable: {}", err));
            println!("{}", "Pull to refresh or retry to try again.".dimmed());
        }
        (CardStatus::Ready, Some(card)) => {
            let mut table = output::create_table();
            table.add_row(vec!["Balance", &card.formatted_balance()]);
            table.add_row(vec!["Card", &card.masked_number()]);
            table.add_row(vec!["Holder", &card.holder()]);
            table.add_row(vec!["Expires", &card.card_expiry_date]);
            println!("{}", table);
        }
        _ => println!("{}", "Loading card...".dimmed()),
    }
}

fn render_actions(snapshot: &HomeSnapshot) {
    let labels: Vec<String> = AccountAction::ALL
        .iter()
        .map(|a| {
            if snapshot.actions_enabled {
                format!("[{}]", a.label())
            } else {
                format!("[{}]", a.label()).dimmed().to_string()
            }
        })
        .collect();
    println!("{}", labels.join(" "));
}

fn render_transactions(snapshot: &HomeSnapshot, limit: usize) {
    if snapshot.transactions_loading {
        println!("{}", "Loading transactions...".dimmed());
        return;
    }
    if let Some(err) = &snapshot.transactions_error {
        output::error(&format!("Transactions unavailable: {}", err));
        return;
    }
    if snapshot.transactions.is_empty() {
        println!("No transactions yet.");
        return;
    }
    println!("{}", transactions_table(&snapshot.transactions, limit));
}

/// Date, title and signed amount, newest first
pub fn transactions_table(transactions: &[Transaction], limit: usize) -> comfy_table::Table {
    let mut table = output::create_table();
    table.set_header(vec!["Date", "Description", "Amount"]);
    for tx in transactions.iter().take(limit) {
        let amount = if tx.is_credit() {
            tx.formatted_amount().green().to_string()
        } else {
            tx.formatted_amount().red().to_string()
        };
        table.add_row(vec![tx.formatted_date(), tx.title().to_string(), amount]);
    }
    table
}
