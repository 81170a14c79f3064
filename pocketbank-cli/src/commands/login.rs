//! Login command - interactive sign-in followed by the home screen

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Password, Select};

use super::{block_on, get_context, home, DemoOverrides};
use crate::output;
use pocketbank_core::adapters::haptics::TerminalBell;
use pocketbank_core::domain::result::Field;
use pocketbank_core::ports::HapticFeedback;
use pocketbank_core::services::{AccountAction, HomeScreen, LoginForm, Route, SubmitOutcome};
use pocketbank_core::PocketContext;

const MAX_ATTEMPTS: usize = 3;

/// Submit the form with a spinner while the session authenticates
pub fn submit(ctx: &PocketContext, form: &mut LoginForm, quiet: bool) -> Result<SubmitOutcome> {
    // An invalid form never reaches the session, so there is nothing to wait on
    let pb = output::spinner("Signing in...", quiet || !form.is_valid())?;
    let outcome = block_on(form.submit(&ctx.auth));
    pb.finish_and_clear();
    Ok(outcome??)
}

/// Print the form's field errors in red
pub fn print_field_errors(form: &LoginForm) {
    for field in [Field::Email, Field::Password] {
        if let Some(msg) = form.error_for(field) {
            output::error(&format!("  {:?}: {}", field, msg));
        }
    }
}

fn prompt_credentials(form: &mut LoginForm, email: Option<String>, reveal: bool) -> Result<()> {
    let email = match email {
        Some(e) => e,
        None => Input::new()
            .with_prompt("Email")
            .with_initial_text(form.email.clone())
            .interact_text()?,
    };
    form.set_email(email);
    form.next_field();

    let password = Password::new().with_prompt("Password").interact()?;
    form.set_password(password);
    if reveal && !form.show_password {
        form.toggle_password_visibility();
    }
    println!("{} {}", "Password:".dimmed(), form.password_display().dimmed());
    Ok(())
}

pub fn run(
    email: Option<String>,
    show_password: bool,
    fail_card: bool,
    fail_transactions: bool,
) -> Result<()> {
    let ctx = get_context(DemoOverrides {
        fail_card,
        fail_transactions,
    })?;

    if ctx.route(Route::Home) == Route::Login {
        sign_in_interactively(&ctx, email, show_password)?;
    }

    let home = ctx.home_screen(Arc::new(TerminalBell) as Arc<dyn HapticFeedback>);
    home::load(&home, false)?;
    home::render(&ctx, &home, &[0.0], home::DEFAULT_LIMIT);

    if atty::is(atty::Stream::Stdin) {
        menu(&ctx, &home)?;
    }
    Ok(())
}

fn sign_in_interactively(ctx: &PocketContext, email: Option<String>, reveal: bool) -> Result<()> {
    let mut form = ctx.login_form();
    form.focus(Some(Field::Email));
    let mut email = email;

    for _ in 0..MAX_ATTEMPTS {
        prompt_credentials(&mut form, email.take(), reveal)?;

        match submit(ctx, &mut form, false)? {
            SubmitOutcome::SignedIn => {
                let who = ctx.auth.snapshot().email().unwrap_or_default().to_string();
                output::success(&format!("Signed in as {}", who));
                return Ok(());
            }
            SubmitOutcome::Invalid | SubmitOutcome::Rejected => print_field_errors(&form),
            SubmitOutcome::Busy => output::warning("A sign-in is already in progress."),
        }
    }
    anyhow::bail!("Too many failed attempts")
}

/// Interactive loop over the home screen until the user quits or signs out
fn menu(ctx: &PocketContext, home: &HomeScreen) -> Result<()> {
    let mut items: Vec<String> = vec![
        "Scroll".to_string(),
        "Pull to refresh".to_string(),
        "Retry card".to_string(),
    ];
    items.extend(AccountAction::ALL.iter().map(|a| a.label().to_string()));
    items.push("Menu".to_string());
    items.push("Sign out".to_string());
    items.push("Quit".to_string());

    loop {
        let choice = Select::new()
            .with_prompt("What next?")
            .items(&items[..])
            .default(0)
            .interact()?;

        match items[choice].as_str() {
            "Scroll" => {
                let offset: f64 = Input::new()
                    .with_prompt("Offset")
                    .default(100.0)
                    .interact_text()?;
                home.on_scroll(offset);
                home::render(ctx, home, &[offset], home::DEFAULT_LIMIT);
            }
            "Pull to refresh" => {
                let pb = output::spinner("Refreshing...", false)?;
                block_on(home.pull_to_refresh())?;
                pb.finish_and_clear();
                home::render(ctx, home, &[home.scroll().get()], home::DEFAULT_LIMIT);
            }
            "Retry card" => {
                let pb = output::spinner("Retrying...", false)?;
                block_on(home.retry())?;
                pb.finish_and_clear();
                home::render(ctx, home, &[home.scroll().get()], home::DEFAULT_LIMIT);
            }
            "Menu" => {
                home.press_menu();
                output::info("Menu opened.");
            }
            "Sign out" => {
                ctx.auth.sign_out();
                output::warning("Signed out.");
                return Ok(());
            }
            "Quit" => return Ok(()),
            label => {
                let action = AccountAction::ALL.into_iter().find(|a| a.label() == label);
                match action {
                    Some(a) if home.press_action(a) => {
                        println!("{} {}", a.label().bold(), "is not available in the demo.".dimmed())
                    }
                    Some(_) => output::warning("Actions are unavailable until the card loads."),
                    None => {}
                }
            }
        }
    }
}
