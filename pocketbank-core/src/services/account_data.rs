//! Account data store - card and transactions queries
//!
//! Each query tracks its own loading/error/data state, so the card can be
//! ready while transactions are still pending (or the other way round).
//! A refetch keeps the last good data on screen while it runs.

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use crate::domain::result::{Error, Result};
use crate::domain::{CardInfo, CardStatus, TransactionFeed};
use crate::ports::AccountDataProvider;
use crate::services::logging::{events, log_quietly, LogEvent, LoggingService};

/// Status of one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryState<T> {
    /// Fetching with no data yet
    pub is_loading: bool,
    /// Any fetch in progress, including background refetches
    pub is_fetching: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            is_loading: false,
            is_fetching: false,
            data: None,
            error: None,
        }
    }
}

impl<T> QueryState<T> {
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.data.is_some() && !self.is_loading
    }

    fn started(&mut self) {
        self.is_fetching = true;
        self.is_loading = self.data.is_none();
    }

    fn settled(&mut self, result: Result<T>) {
        self.is_fetching = false;
        self.is_loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

impl QueryState<CardInfo> {
    /// How the card header should lay itself out
    pub fn card_status(&self) -> CardStatus {
        if self.error.is_some() {
            CardStatus::Failed
        } else if self.is_loading || self.data.is_none() {
            CardStatus::Loading
        } else {
            CardStatus::Ready
        }
    }
}

/// Holds both queries for the home screen
pub struct AccountDataStore {
    provider: Arc<dyn AccountDataProvider>,
    card: watch::Sender<QueryState<CardInfo>>,
    transactions: watch::Sender<QueryState<TransactionFeed>>,
    logger: Option<Arc<LoggingService>>,
}

impl AccountDataStore {
    pub fn new(provider: Arc<dyn AccountDataProvider>) -> Self {
        let (card, _) = watch::channel(QueryState::default());
        let (transactions, _) = watch::channel(QueryState::default());
        Self {
            provider,
            card,
            transactions,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: Arc<LoggingService>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn card(&self) -> QueryState<CardInfo> {
        self.card.borrow().clone()
    }

    pub fn transactions(&self) -> QueryState<TransactionFeed> {
        self.transactions.borrow().clone()
    }

    /// Fetch both queries concurrently. Each settles independently.
    pub async fn load(&self) {
        tokio::join!(self.refetch_card(), self.refetch_transactions());
    }

    /// A card without a number or holder counts as a failed fetch
    pub async fn refetch_card(&self) {
        let provider = Arc::clone(&self.provider);
        self.run(&self.card, "card", async move {
            provider.fetch_card().await.and_then(|card| {
                card.validate().map_err(Error::data_fetch)?;
                Ok(card)
            })
        })
        .await;
    }

    pub async fn refetch_transactions(&self) {
        let provider = Arc::clone(&self.provider);
        self.run(&self.transactions, "transactions", async move {
            provider.fetch_transactions().await
        })
        .await;
    }

    async fn run<T, F>(&self, query: &watch::Sender<QueryState<T>>, name: &str, fetch: F)
    where
        F: Future<Output = Result<T>>,
    {
        query.send_modify(QueryState::started);
        let result = fetch.await;
        if let Err(e) = &result {
            log_quietly(
                self.logger.as_ref(),
                LogEvent::new(events::FETCH_FAILED)
                    .with_screen("home")
                    .with_action(name)
                    .with_error(e.to_string())
                    .with_error_details(self.provider.name()),
            );
        }
        query.send_modify(|state| state.settled(result));
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::adapters::demo::DemoAccountData;

    fn store(provider: &Arc<DemoAccountData>) -> AccountDataStore {
        AccountDataStore::new(Arc::clone(provider) as Arc<dyn AccountDataProvider>)
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_fills_both_queries() {
        let provider = Arc::new(DemoAccountData::new(Duration::from_millis(600)));
        let store = store(&provider);
        assert_eq!(store.card().card_status(), CardStatus::Loading);

        store.load().await;

        let card = store.card();
        assert!(card.is_success());
        assert_eq!(card.card_status(), CardStatus::Ready);
        assert!(store.transactions().is_success());
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_failure_is_isolated() {
        let provider = Arc::new(DemoAccountData::new(Duration::ZERO));
        provider.set_fail_transactions(true);
        let store = store(&provider);

        store.load().await;

        assert_eq!(store.card().card_status(), CardStatus::Ready);
        let txs = store.transactions();
        assert!(txs.error.is_some());
        assert!(txs.data.is_none());
        assert!(!txs.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refetch_keeps_last_data() {
        let provider = Arc::new(DemoAccountData::new(Duration::ZERO));
        let store = store(&provider);
        store.load().await;

        provider.set_fail_card(true);
        store.refetch_card().await;

        let card = store.card();
        assert!(card.error.is_some());
        assert!(card.data.is_some());
        assert_eq!(card.card_status(), CardStatus::Failed);

        provider.set_fail_card(false);
        store.refetch_card().await;
        assert_eq!(store.card().card_status(), CardStatus::Ready);
    }

    struct BlankCardProvider;

    #[async_trait::async_trait]
    impl AccountDataProvider for BlankCardProvider {
        fn name(&self) -> &str {
            "blank"
        }

        async fn fetch_card(&self) -> Result<CardInfo> {
            Ok(CardInfo {
                card_balance: rust_decimal::Decimal::ONE,
                card_number: " ".to_string(),
                full_name: "Ada Lovelace".to_string(),
                card_expiry_date: "09/28".to_string(),
            })
        }

        async fn fetch_transactions(&self) -> Result<TransactionFeed> {
            Ok(TransactionFeed::default())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_card_counts_as_failure() {
        let store = AccountDataStore::new(Arc::new(BlankCardProvider));
        store.refetch_card().await;

        let card = store.card();
        assert_eq!(card.error.as_deref(), Some("Data fetch error: card number cannot be empty"));
        assert!(card.data.is_none());
        assert_eq!(card.card_status(), CardStatus::Failed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refetch_is_not_loading_when_data_present() {
        let provider = Arc::new(DemoAccountData::new(Duration::from_secs(1)));
        let store = Arc::new(store(&provider));
        store.load().await;

        let task = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.refetch_card().await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;

        let card = store.card();
        assert!(card.is_fetching);
        assert!(!card.is_loading);
        assert_eq!(card.card_status(), CardStatus::Ready);

        task.await.unwrap();
        assert!(!store.card().is_fetching);
    }
}
