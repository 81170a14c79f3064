//! Transactions command - list the merged transaction feed

use anyhow::Result;
use colored::Colorize;

use super::{block_on, get_context, home, DemoOverrides};
use crate::output;
use pocketbank_core::services::AccountDataStore;
use pocketbank_core::OperationResult;

pub fn run(limit: usize, credits_only: bool, fail: bool, json: bool) -> Result<()> {
    let ctx = get_context(DemoOverrides {
        fail_card: false,
        fail_transactions: fail,
    })?;
    let mut store = AccountDataStore::new(ctx.provider.clone());
    if let Some(logger) = &ctx.logger {
        store = store.with_logger(logger.clone());
    }

    let pb = output::spinner("Fetching transactions...", json)?;
    block_on(store.refetch_transactions())?;
    pb.finish_and_clear();

    let query = store.transactions();
    let feed = match (query.data, query.error) {
        (Some(feed), None) => feed,
        (_, error) => {
            let msg = error.unwrap_or_else(|| "no data".to_string());
            if json {
                let result: OperationResult<()> = OperationResult::fail(msg.clone());
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            anyhow::bail!("Transactions unavailable: {}", msg);
        }
    };

    let mut list = feed.merged();
    if credits_only {
        list.retain(|tx| tx.is_credit());
    }

    if json {
        let total = list.len();
        list.truncate(limit);
        let result = OperationResult::ok(list)
            .with_context("total", serde_json::json!(total))
            .with_context("provider", serde_json::json!(store.provider_name()));
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let summary = format!(
        "({} of {}, {} debits, {} credits)",
        limit.min(list.len()),
        list.len(),
        feed.transactions.len(),
        feed.credits.len()
    );
    println!("{} {}", "Transactions".bold(), summary.dimmed());
    println!("{}", home::transactions_table(&list, limit));
    Ok(())
}
