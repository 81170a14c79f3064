//! Home screen behaviour over the demo provider
//!
//! Covers the header layout across the loading, ready and failed card states,
//! concurrent query settlement and haptics.
//!
//! Run with: cargo test --test home_screen_test

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use pocketbank_core::adapters::demo::DemoAccountData;
use pocketbank_core::adapters::haptics::RecordingHaptics;
use pocketbank_core::config::Config;
use pocketbank_core::domain::presentation::{ERROR_CARD_HEIGHT, ERROR_CONTAINER_HEIGHT};
use pocketbank_core::domain::CardStatus;
use pocketbank_core::ports::{AccountDataProvider, HapticFeedback, ImpactStyle};
use pocketbank_core::services::logging::events;
use pocketbank_core::services::{AccountAction, EntryPoint, HomeScreen, LoggingService};
use pocketbank_core::PocketContext;

// ============================================================================
// Test Helpers
// ============================================================================

fn create_context(
    provider: &Arc<DemoAccountData>,
    logger: Option<Arc<LoggingService>>,
) -> PocketContext {
    let config = Config {
        screen_width: 400.0,
        ..Config::instant()
    };
    PocketContext::with_provider(
        config,
        Arc::clone(provider) as Arc<dyn AccountDataProvider>,
        logger,
    )
}

fn mount(ctx: &PocketContext, haptics: &Arc<RecordingHaptics>) -> HomeScreen {
    ctx.home_screen(Arc::clone(haptics) as Arc<dyn HapticFeedback>)
}

// ============================================================================
// Header layout
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_header_collapses_with_scroll() {
    let provider = Arc::new(DemoAccountData::new(Duration::ZERO));
    let ctx = create_context(&provider, None);
    let haptics = Arc::new(RecordingHaptics::new());
    let home = mount(&ctx, &haptics);
    home.mount().await;

    let top = home.card_style();
    assert_eq!(top.balance_card.width, 360.0);
    assert_eq!(top.balance_font_size, 36.0);
    assert_eq!(top.menu_icon_opacity, 0.0);

    home.on_scroll(200.0);
    let collapsed = home.card_style();
    assert_eq!(collapsed.balance_card.width, 230.0);
    assert_eq!(collapsed.balance_card.translate_y, -90.0);
    assert_eq!(collapsed.balance_font_size, 22.0);
    assert_eq!(collapsed.balance_label_opacity, 0.0);
    assert_eq!(collapsed.menu_icon_opacity, 1.0);

    let actions = collapsed.actions.expect("action row is shown");
    assert_eq!(actions.opacity, 0.0);
}

#[tokio::test(start_paused = true)]
async fn test_each_mount_starts_at_top() {
    let provider = Arc::new(DemoAccountData::new(Duration::ZERO));
    let ctx = create_context(&provider, None);
    let haptics = Arc::new(RecordingHaptics::new());

    let first = mount(&ctx, &haptics);
    first.on_scroll(150.0);

    let second = mount(&ctx, &haptics);
    assert_eq!(second.scroll().get(), 0.0);
    assert_eq!(first.scroll().get(), 150.0);
}

#[tokio::test(start_paused = true)]
async fn test_failed_card_ignores_scroll() {
    let provider = Arc::new(DemoAccountData::new(Duration::ZERO));
    provider.set_fail_card(true);
    let ctx = create_context(&provider, None);
    let haptics = Arc::new(RecordingHaptics::new());
    let home = mount(&ctx, &haptics);
    home.mount().await;

    assert_eq!(home.card_status(), CardStatus::Failed);
    for offset in [-40.0, 0.0, 60.0, 199.0, 5000.0] {
        home.on_scroll(offset);
        let style = home.card_style();
        assert_eq!(style.container_height, ERROR_CONTAINER_HEIGHT);
        assert_eq!(style.balance_card.height, ERROR_CARD_HEIGHT);
        assert_eq!(style.balance_card.width, 360.0);
        assert_eq!(style.balance_card.translate_x, 0.0);
        assert_eq!(style.menu_icon_opacity, 0.0);
        assert!(style.actions.is_none());
    }
    assert!(!home.press_action(AccountAction::Transfer));
}

// ============================================================================
// Queries
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_transactions_render_while_card_fails() {
    let temp_dir = TempDir::new().unwrap();
    let logger = Arc::new(LoggingService::new(temp_dir.path(), EntryPoint::Mobile, "test").unwrap());

    let provider = Arc::new(DemoAccountData::new(Duration::ZERO));
    provider.set_fail_card(true);
    let ctx = create_context(&provider, Some(Arc::clone(&logger)));
    let haptics = Arc::new(RecordingHaptics::new());
    let home = mount(&ctx, &haptics);
    home.mount().await;

    let snapshot = home.snapshot();
    assert!(snapshot.card.error.is_some());
    assert!(!snapshot.transactions.is_empty());
    assert!(snapshot.transactions_error.is_none());

    let errors = logger.get_errors(10).unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].event, events::FETCH_FAILED);
    assert_eq!(errors[0].action.as_deref(), Some("card"));
    assert_eq!(errors[0].error_details.as_deref(), Some("demo"));
}

#[tokio::test(start_paused = true)]
async fn test_queries_load_concurrently() {
    let provider = Arc::new(DemoAccountData::new(Duration::from_millis(600)));
    let ctx = create_context(&provider, None);
    let haptics = Arc::new(RecordingHaptics::new());
    let home = mount(&ctx, &haptics);

    let start = tokio::time::Instant::now();
    home.mount().await;

    // Each fetch takes at most 750ms; sequential would need at least 1200ms
    assert!(start.elapsed() < Duration::from_millis(1000));
    let snapshot = home.snapshot();
    assert_eq!(snapshot.card_status, CardStatus::Ready);
    assert!(!snapshot.transactions_loading);
}

#[tokio::test(start_paused = true)]
async fn test_refresh_and_retry_haptics() {
    let provider = Arc::new(DemoAccountData::new(Duration::ZERO));
    let ctx = create_context(&provider, None);
    let haptics = Arc::new(RecordingHaptics::new());
    let home = mount(&ctx, &haptics);
    home.mount().await;

    home.pull_to_refresh().await;
    assert!(home.press_action(AccountAction::TopUp));
    home.retry().await;
    home.press_menu();

    assert_eq!(
        haptics.impacts(),
        vec![
            ImpactStyle::Light,
            ImpactStyle::Light,
            ImpactStyle::Heavy,
            ImpactStyle::Heavy
        ]
    );
}
