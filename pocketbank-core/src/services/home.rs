//! Home screen view model
//!
//! Ties the scroll offset, the account queries and the header layout
//! together. Rendering layers (the CLI, or a UI shell) read [`HomeSnapshot`]
//! and forward user input to the methods here.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::{
    CardInfo, CardPresentation, CardStatus, CardVisualState, ScrollProgress, Transaction,
};
use crate::ports::{HapticFeedback, ImpactStyle};
use crate::services::account_data::{AccountDataStore, QueryState};
use crate::services::logging::{events, log_quietly, LogEvent, LoggingService};

/// Buttons in the action row under the cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountAction {
    TopUp,
    Exchange,
    Transfer,
    Details,
}

impl AccountAction {
    pub const ALL: [AccountAction; 4] = [
        AccountAction::TopUp,
        AccountAction::Exchange,
        AccountAction::Transfer,
        AccountAction::Details,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            AccountAction::TopUp => "top-up",
            AccountAction::Exchange => "exchange",
            AccountAction::Transfer => "transfer",
            AccountAction::Details => "details",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountAction::TopUp => "Top up",
            AccountAction::Exchange => "Exchange",
            AccountAction::Transfer => "Transfer",
            AccountAction::Details => "Details",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.id() == id)
    }
}

/// Everything needed to draw the home screen at one moment
#[derive(Debug, Clone, Serialize)]
pub struct HomeSnapshot {
    pub offset: f64,
    pub card_status: CardStatus,
    pub card: QueryState<CardInfo>,
    pub transactions_loading: bool,
    pub transactions_error: Option<String>,
    /// Debits and credits merged, newest first
    pub transactions: Vec<Transaction>,
    pub style: CardVisualState,
    pub actions_enabled: bool,
}

pub struct HomeScreen {
    scroll: ScrollProgress,
    store: AccountDataStore,
    presentation: CardPresentation,
    haptics: Arc<dyn HapticFeedback>,
    logger: Option<Arc<LoggingService>>,
}

impl HomeScreen {
    /// Each mount starts with a fresh scroll offset at the top
    pub fn new(
        store: AccountDataStore,
        presentation: CardPresentation,
        haptics: Arc<dyn HapticFeedback>,
    ) -> Self {
        Self {
            scroll: ScrollProgress::new(),
            store,
            presentation,
            haptics,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: Arc<LoggingService>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Shared handle for readers of the offset
    pub fn scroll(&self) -> ScrollProgress {
        self.scroll.clone()
    }

    pub fn store(&self) -> &AccountDataStore {
        &self.store
    }

    /// Initial fetch on mount
    pub async fn mount(&self) {
        log_quietly(self.logger.as_ref(), LogEvent::new(events::SCREEN_OPENED).with_screen("home"));
        self.store.load().await;
    }

    pub fn on_scroll(&self, offset: f64) {
        self.scroll.set(offset);
    }

    pub fn card_status(&self) -> CardStatus {
        self.store.card().card_status()
    }

    /// Header layout for the current offset and card status
    pub fn card_style(&self) -> CardVisualState {
        self.presentation.style(self.scroll.get(), self.card_status())
    }

    /// Actions are disabled until card data is available
    pub fn actions_enabled(&self) -> bool {
        let card = self.store.card();
        !card.is_loading && card.data.is_some()
    }

    /// Pull-to-refresh released: refetch both queries
    pub async fn pull_to_refresh(&self) {
        self.impact(ImpactStyle::Light);
        self.log_refetch("pull_to_refresh");
        self.store.load().await;
    }

    /// Retry button on the failed card
    pub async fn retry(&self) {
        self.impact(ImpactStyle::Heavy);
        self.log_refetch("retry");
        self.store.refetch_card().await;
    }

    /// Tap on an action button. Returns false when the row is disabled.
    pub fn press_action(&self, action: AccountAction) -> bool {
        if !self.actions_enabled() {
            return false;
        }
        self.impact(ImpactStyle::Light);
        log_quietly(
            self.logger.as_ref(),
            LogEvent::new(events::ACTION_PRESSED).with_screen("home").with_action(action.id()),
        );
        true
    }

    pub fn press_menu(&self) {
        self.impact(ImpactStyle::Heavy);
        log_quietly(self.logger.as_ref(), LogEvent::new(events::MENU_PRESSED).with_screen("home"));
    }

    pub fn snapshot(&self) -> HomeSnapshot {
        let offset = self.scroll.get();
        let card = self.store.card();
        let card_status = card.card_status();
        let txs = self.store.transactions();
        HomeSnapshot {
            offset,
            card_status,
            style: self.presentation.style(offset, card_status),
            actions_enabled: !card.is_loading && card.data.is_some(),
            card,
            transactions_loading: txs.is_loading,
            transactions_error: txs.error.clone(),
            transactions: txs.data.as_ref().map(|f| f.merged()).unwrap_or_default(),
        }
    }

    fn impact(&self, style: ImpactStyle) {
        let _ = self.haptics.impact(style);
    }

    fn log_refetch(&self, action: &str) {
        log_quietly(
            self.logger.as_ref(),
            LogEvent::new(events::REFETCH_REQUESTED).with_screen("home").with_action(action),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::adapters::demo::DemoAccountData;
    use crate::adapters::haptics::RecordingHaptics;
    use crate::domain::presentation::{ERROR_CARD_HEIGHT, ERROR_CONTAINER_HEIGHT};
    use crate::ports::AccountDataProvider;

    fn screen(provider: &Arc<DemoAccountData>, haptics: &Arc<RecordingHaptics>) -> HomeScreen {
        let store = AccountDataStore::new(Arc::clone(provider) as Arc<dyn AccountDataProvider>);
        HomeScreen::new(
            store,
            CardPresentation::new(400.0),
            Arc::clone(haptics) as Arc<dyn HapticFeedback>,
        )
    }

    #[test]
    fn test_action_ids_round_trip() {
        for action in AccountAction::ALL {
            assert_eq!(AccountAction::from_id(action.id()), Some(action));
        }
        assert_eq!(AccountAction::from_id("withdraw"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scroll_drives_card_style() {
        let provider = Arc::new(DemoAccountData::new(Duration::ZERO));
        let haptics = Arc::new(RecordingHaptics::new());
        let home = screen(&provider, &haptics);
        home.mount().await;

        assert_eq!(home.card_style().container_height, 425.0);
        home.on_scroll(200.0);
        assert_eq!(home.card_style().container_height, 75.0);
        home.on_scroll(1000.0);
        assert_eq!(home.card_style().balance_card.height, 70.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_actions_disabled_while_loading() {
        let provider = Arc::new(DemoAccountData::new(Duration::ZERO));
        let haptics = Arc::new(RecordingHaptics::new());
        let home = screen(&provider, &haptics);

        assert!(!home.press_action(AccountAction::TopUp));
        assert!(haptics.impacts().is_empty());

        home.mount().await;
        assert!(home.press_action(AccountAction::TopUp));
        assert_eq!(haptics.impacts(), vec![ImpactStyle::Light]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_card_pins_layout_and_retry_recovers() {
        let provider = Arc::new(DemoAccountData::new(Duration::ZERO));
        provider.set_fail_card(true);
        let haptics = Arc::new(RecordingHaptics::new());
        let home = screen(&provider, &haptics);
        home.mount().await;

        for offset in [0.0, 75.0, 200.0, 900.0] {
            home.on_scroll(offset);
            let style = home.card_style();
            assert_eq!(style.container_height, ERROR_CONTAINER_HEIGHT);
            assert_eq!(style.balance_card.height, ERROR_CARD_HEIGHT);
            assert!(style.credit_card.is_none());
        }

        provider.set_fail_card(false);
        home.retry().await;
        assert_eq!(home.card_status(), CardStatus::Ready);
        assert_eq!(haptics.impacts(), vec![ImpactStyle::Heavy]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_haptic_failure_does_not_affect_refresh() {
        let provider = Arc::new(DemoAccountData::new(Duration::ZERO));
        let haptics = Arc::new(RecordingHaptics::failing());
        let home = screen(&provider, &haptics);

        home.pull_to_refresh().await;
        home.press_menu();

        let snapshot = home.snapshot();
        assert_eq!(snapshot.card_status, CardStatus::Ready);
        assert!(!snapshot.transactions.is_empty());
        assert_eq!(haptics.impacts(), vec![ImpactStyle::Light, ImpactStyle::Heavy]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_lists_newest_first() {
        let provider = Arc::new(DemoAccountData::new(Duration::ZERO));
        let haptics = Arc::new(RecordingHaptics::new());
        let home = screen(&provider, &haptics);
        home.mount().await;

        let snapshot = home.snapshot();
        assert!(snapshot.actions_enabled);
        assert!(snapshot
            .transactions
            .windows(2)
            .all(|pair| pair[0].date >= pair[1].date));
    }
}
