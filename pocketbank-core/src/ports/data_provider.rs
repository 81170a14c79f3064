//! Account data provider port
//!
//! Defines the interface for fetching the signed-in user's card and
//! transactions (demo data, a mocked API, test doubles).

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::{CardInfo, TransactionFeed};

/// Account data provider trait
///
/// The card and transactions are independent queries. Callers may run them
/// concurrently and must not assume either completes first.
#[async_trait]
pub trait AccountDataProvider: Send + Sync {
    /// Provider name (e.g., "demo")
    fn name(&self) -> &str;

    /// Fetch the card shown on the balance header
    async fn fetch_card(&self) -> Result<CardInfo>;

    /// Fetch debits and credits for the transaction list
    async fn fetch_transactions(&self) -> Result<TransactionFeed>;
}
