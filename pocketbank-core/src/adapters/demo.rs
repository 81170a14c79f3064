//! Demo account data provider
//!
//! Generates a realistic card and transaction history:
//! - one debit card with a small raw balance (scaled on display)
//! - 60 days of debits with weekly/monthly patterns
//! - salary and refund credits in a separate list

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration as Days, NaiveDate, TimeZone, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::Config;
use crate::domain::result::{Error, Result};
use crate::domain::{CardInfo, Transaction, TransactionFeed};
use crate::ports::AccountDataProvider;

const HISTORY_DAYS: i64 = 60;

/// Generate the demo card
pub fn generate_demo_card() -> CardInfo {
    CardInfo {
        card_balance: Decimal::new(482347, 5), // shown as £4823.47
        card_number: "4929 1234 5678 2025".to_string(),
        full_name: "Alex Morgan".to_string(),
        card_expiry_date: "08/29".to_string(),
    }
}

fn at(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
    let naive = date.and_hms_opt(hour, minute, 0).unwrap_or_default();
    Utc.from_utc_datetime(&naive)
}

fn debit(date: NaiveDate, hour: u32, minute: u32, vendor: &str, cents: i64) -> Transaction {
    let mut tx = Transaction::debit(
        Uuid::new_v4().to_string(),
        vendor,
        Decimal::new(cents, 2),
        at(date, hour, minute),
    );
    tx.vendor_logo = format!("https://logo.clearbit.com/{}.com", vendor.to_lowercase().replace(' ', ""));
    tx
}

fn credit(date: NaiveDate, hour: u32, minute: u32, creditor: &str, cents: i64) -> Transaction {
    Transaction::credit(
        Uuid::new_v4().to_string(),
        creditor,
        Decimal::new(cents, 2),
        at(date, hour, minute),
    )
}

/// Generate `days` of history ending on `today`.
///
/// Lists are in generation order (newest day first, by time of day within a
/// day), not globally sorted.
pub fn generate_demo_feed(today: NaiveDate, days: i64) -> TransactionFeed {
    let mut transactions = Vec::new();
    let mut credits = Vec::new();

    for days_ago in 0..days {
        let date = today - Days::days(days_ago);
        let day_of_month = date.day();

        // Coffee every other morning
        if days_ago % 2 == 0 {
            transactions.push(debit(date, 8, 15, "Pret A Manger", 385));
        }

        // Groceries every 3 days
        if days_ago % 3 == 0 {
            let amounts = [4523i64, 3745, 6234, 2810, 5899, 7105];
            let amount = amounts[days_ago as usize % amounts.len()];
            transactions.push(debit(date, 18, 40, "Tesco", amount));
        }

        // Eating out twice a week
        if days_ago % 7 == 2 || days_ago % 7 == 5 {
            let restaurants = [
                ("Nando's", 2450i64),
                ("Dishoom", 4875),
                ("Wagamama", 2190),
                ("Franco Manca", 1825),
            ];
            let (name, amount) = restaurants[days_ago as usize % restaurants.len()];
            transactions.push(debit(date, 20, 5, name, amount));
        }

        // Weekly travel top-up
        if days_ago % 7 == 0 {
            transactions.push(debit(date, 7, 50, "TfL", 3000));
        }

        // Monthly bills and subscriptions
        match day_of_month {
            1 => transactions.push(debit(date, 9, 0, "Landlord", 145000)),
            3 => transactions.push(debit(date, 6, 0, "Netflix", 1099)),
            7 => transactions.push(debit(date, 6, 0, "Spotify", 1199)),
            12 => transactions.push(debit(date, 10, 30, "Octopus Energy", 8900)),
            _ => {}
        }

        // Salary on the 28th, occasional refunds
        if day_of_month == 28 {
            credits.push(credit(date, 9, 0, "Acme Ltd Payroll", 285000));
        }
        if days_ago % 17 == 4 {
            credits.push(credit(date, 14, 20, "Amazon Refund", 2399));
        }
    }

    TransactionFeed { transactions, credits }
}

/// Demo provider with simulated latency and switchable failures
pub struct DemoAccountData {
    latency: Duration,
    fail_card: AtomicBool,
    fail_transactions: AtomicBool,
}

impl DemoAccountData {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            fail_card: AtomicBool::new(false),
            fail_transactions: AtomicBool::new(false),
        }
    }

    /// Build from configuration, including injected failures
    pub fn from_config(config: &Config) -> Self {
        let provider = Self::new(config.fetch_latency());
        provider.set_fail_card(config.demo.fail_card);
        provider.set_fail_transactions(config.demo.fail_transactions);
        provider
    }

    pub fn set_fail_card(&self, fail: bool) {
        self.fail_card.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_transactions(&self, fail: bool) {
        self.fail_transactions.store(fail, Ordering::SeqCst);
    }

    /// Simulated network round trip, up to 25% slower than the base latency
    async fn round_trip(&self) {
        if self.latency.is_zero() {
            return;
        }
        let base = self.latency.as_millis() as u64;
        let jitter = rand::thread_rng().gen_range(0..=base / 4);
        tokio::time::sleep(Duration::from_millis(base + jitter)).await;
    }
}

#[async_trait]
impl AccountDataProvider for DemoAccountData {
    fn name(&self) -> &str {
        "demo"
    }

    async fn fetch_card(&self) -> Result<CardInfo> {
        self.round_trip().await;
        if self.fail_card.load(Ordering::SeqCst) {
            return Err(Error::data_fetch("card service unavailable"));
        }
        Ok(generate_demo_card())
    }

    async fn fetch_transactions(&self) -> Result<TransactionFeed> {
        self.round_trip().await;
        if self.fail_transactions.load(Ordering::SeqCst) {
            return Err(Error::data_fetch("transactions service unavailable"));
        }
        Ok(generate_demo_feed(Utc::now().date_naive(), HISTORY_DAYS))
    }
}
