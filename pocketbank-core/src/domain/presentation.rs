//! Scroll-driven layout of the balance card header
//!
//! Everything here is a pure function of the scroll offset, the card query
//! status and the screen width. As the transaction list scrolls up, the
//! header collapses: the balance card shrinks and slides right, the credit
//! card shrinks beside it, and the action row and labels fade out.

use serde::{Deserialize, Serialize};

use super::interpolation::{linear, Interpolation};

/// Offset at which the header is fully collapsed
pub const COLLAPSED_AT: f64 = 200.0;

/// Fixed header height while the card query is failed
pub const ERROR_CONTAINER_HEIGHT: f64 = 240.0;
/// Fixed balance card height while the card query is failed
pub const ERROR_CARD_HEIGHT: f64 = 215.0;

const HORIZONTAL_MARGIN: f64 = 40.0;

/// State of the card query as far as layout is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    Loading,
    Ready,
    Failed,
}

/// Size and translation of an animated box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    pub width: f64,
    pub height: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditCardVisualState {
    pub card: BoxStyle,
    pub logo_translate_x: f64,
    /// Opacity of the card number, holder and expiry
    pub data_opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionRowVisualState {
    pub opacity: f64,
    pub translate_y: f64,
}

/// Every interpolated attribute of the header for one scroll position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardVisualState {
    pub container_height: f64,
    pub balance_card: BoxStyle,
    pub balance_font_size: f64,
    pub balance_translate_y: f64,
    pub balance_label_opacity: f64,
    pub menu_icon_opacity: f64,
    /// Not presented while the card query is failed
    pub credit_card: Option<CreditCardVisualState>,
    /// Not presented while the card query is failed
    pub actions: Option<ActionRowVisualState>,
}

const CONTAINER_HEIGHT: Interpolation<2> = linear((0.0, 425.0), (COLLAPSED_AT, 75.0));
const CARD_HEIGHT: Interpolation<2> = linear((0.0, 200.0), (COLLAPSED_AT, 70.0));
const CARD_TRANSLATE_Y: Interpolation<2> = linear((0.0, 0.0), (COLLAPSED_AT, -90.0));
const BALANCE_FONT_SIZE: Interpolation<2> = linear((0.0, 36.0), (COLLAPSED_AT, 22.0));
const BALANCE_TRANSLATE_Y: Interpolation<2> = linear((0.0, 0.0), (COLLAPSED_AT, 32.0));
const LABEL_OPACITY: Interpolation<2> = linear((0.0, 1.0), (50.0, 0.0));
const MENU_ICON_OPACITY: Interpolation<2> = linear((50.0, 0.0), (COLLAPSED_AT, 1.0));
const LOGO_TRANSLATE_X: Interpolation<2> = linear((20.0, 0.0), (COLLAPSED_AT, -12.0));
const ACTIONS_OPACITY: Interpolation<2> = linear((0.0, 1.0), (25.0, 0.0));
const ACTIONS_TRANSLATE_Y: Interpolation<2> = linear((0.0, 0.0), (50.0, 20.0));

/// Derives [`CardVisualState`] for a given screen width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPresentation {
    screen_width: f64,
}

impl CardPresentation {
    pub fn new(screen_width: f64) -> Self {
        Self { screen_width }
    }

    pub fn screen_width(&self) -> f64 {
        self.screen_width
    }

    /// Full-width card size used at rest
    fn full_width(&self) -> f64 {
        self.screen_width - HORIZONTAL_MARGIN
    }

    fn card_width(&self) -> Interpolation<2> {
        linear((0.0, self.full_width()), (COLLAPSED_AT, self.screen_width * 0.6 - 10.0))
    }

    fn card_translate_x(&self) -> Interpolation<3> {
        let w = self.screen_width;
        Interpolation::new([0.0, 60.0, COLLAPSED_AT], [0.0, w / 10.0, w * 0.3 + 10.0])
    }

    fn credit_card_width(&self) -> Interpolation<2> {
        linear((0.0, self.full_width()), (COLLAPSED_AT, self.screen_width * 0.3))
    }

    fn credit_card_translate_x(&self) -> Interpolation<2> {
        linear((0.0, 0.0), (COLLAPSED_AT, -self.screen_width / 20.0 + 15.0))
    }

    /// Header layout for `offset`.
    ///
    /// A failed card query pins the header to fixed dimensions and scroll
    /// stops affecting it.
    pub fn style(&self, offset: f64, status: CardStatus) -> CardVisualState {
        if status == CardStatus::Failed {
            return self.error_style();
        }

        let credit_card = CreditCardVisualState {
            card: BoxStyle {
                width: self.credit_card_width().at(offset),
                height: CARD_HEIGHT.at(offset),
                translate_x: self.credit_card_translate_x().at(offset),
                translate_y: 0.0,
            },
            logo_translate_x: LOGO_TRANSLATE_X.at(offset),
            data_opacity: LABEL_OPACITY.at(offset),
        };

        let menu_icon_opacity = match status {
            CardStatus::Ready => MENU_ICON_OPACITY.at(offset),
            _ => 0.0,
        };

        CardVisualState {
            container_height: CONTAINER_HEIGHT.at(offset),
            balance_card: BoxStyle {
                width: self.card_width().at(offset),
                height: CARD_HEIGHT.at(offset),
                translate_x: self.card_translate_x().at(offset),
                translate_y: CARD_TRANSLATE_Y.at(offset),
            },
            balance_font_size: BALANCE_FONT_SIZE.at(offset),
            balance_translate_y: BALANCE_TRANSLATE_Y.at(offset),
            balance_label_opacity: LABEL_OPACITY.at(offset),
            menu_icon_opacity,
            credit_card: Some(credit_card),
            actions: Some(ActionRowVisualState {
                opacity: ACTIONS_OPACITY.at(offset),
                translate_y: ACTIONS_TRANSLATE_Y.at(offset),
            }),
        }
    }

    fn error_style(&self) -> CardVisualState {
        let rest = 0.0;
        CardVisualState {
            container_height: ERROR_CONTAINER_HEIGHT,
            balance_card: BoxStyle {
                width: self.full_width(),
                height: ERROR_CARD_HEIGHT,
                translate_x: 0.0,
                translate_y: 0.0,
            },
            balance_font_size: BALANCE_FONT_SIZE.at(rest),
            balance_translate_y: BALANCE_TRANSLATE_Y.at(rest),
            balance_label_opacity: LABEL_OPACITY.at(rest),
            menu_icon_opacity: 0.0,
            credit_card: None,
            actions: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f64 = 400.0;

    fn within(value: f64, a: f64, b: f64) -> bool {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        value >= lo - 1e-9 && value <= hi + 1e-9
    }

    #[test]
    fn test_rest_position() {
        let style = CardPresentation::new(W).style(0.0, CardStatus::Ready);
        assert_eq!(style.container_height, 425.0);
        assert_eq!(style.balance_card.height, 200.0);
        assert_eq!(style.balance_card.width, 360.0);
        assert_eq!(style.balance_card.translate_x, 0.0);
        assert_eq!(style.balance_font_size, 36.0);
        assert_eq!(style.balance_label_opacity, 1.0);
        assert_eq!(style.menu_icon_opacity, 0.0);
        assert_eq!(style.actions.unwrap().opacity, 1.0);
    }

    #[test]
    fn test_fully_collapsed() {
        let style = CardPresentation::new(W).style(COLLAPSED_AT, CardStatus::Ready);
        assert_eq!(style.container_height, 75.0);
        assert_eq!(style.balance_card.height, 70.0);
        assert!((style.balance_card.width - 230.0).abs() < 1e-9);
        assert!((style.balance_card.translate_x - 130.0).abs() < 1e-9);
        assert_eq!(style.balance_card.translate_y, -90.0);
        assert_eq!(style.balance_font_size, 22.0);
        assert_eq!(style.menu_icon_opacity, 1.0);

        let credit = style.credit_card.unwrap();
        assert!((credit.card.width - 120.0).abs() < 1e-9);
        assert_eq!(credit.card.translate_x, -5.0);
        assert_eq!(credit.logo_translate_x, -12.0);
        assert_eq!(credit.data_opacity, 0.0);
    }

    #[test]
    fn test_translate_x_passes_through_middle_breakpoint() {
        let style = CardPresentation::new(W).style(60.0, CardStatus::Ready);
        assert_eq!(style.balance_card.translate_x, 40.0);
    }

    #[test]
    fn test_outputs_never_leave_their_ranges() {
        let presentation = CardPresentation::new(W);
        let mut offset = -100.0;
        while offset <= 1_000.0 {
            let s = presentation.style(offset, CardStatus::Ready);
            assert!(within(s.container_height, 425.0, 75.0));
            assert!(within(s.balance_card.height, 200.0, 70.0));
            assert!(within(s.balance_card.width, W - 40.0, W * 0.6 - 10.0));
            assert!(within(s.balance_card.translate_x, 0.0, W * 0.3 + 10.0));
            assert!(within(s.balance_card.translate_y, 0.0, -90.0));
            assert!(within(s.balance_font_size, 36.0, 22.0));
            assert!(within(s.balance_label_opacity, 1.0, 0.0));
            assert!(within(s.menu_icon_opacity, 0.0, 1.0));
            let actions = s.actions.unwrap();
            assert!(within(actions.opacity, 1.0, 0.0));
            assert!(within(actions.translate_y, 0.0, 20.0));
            let credit = s.credit_card.unwrap();
            assert!(within(credit.card.width, W - 40.0, W * 0.3));
            assert!(within(credit.card.height, 200.0, 70.0));
            assert!(within(credit.card.translate_x, 0.0, -W / 20.0 + 15.0));
            assert_eq!(credit.card.translate_y, 0.0);
            assert!(within(credit.logo_translate_x, 0.0, -12.0));
            assert!(within(credit.data_opacity, 1.0, 0.0));
            offset += 7.5;
        }
    }

    #[test]
    fn test_failed_card_pins_dimensions() {
        let presentation = CardPresentation::new(W);
        for offset in [0.0, 25.0, 60.0, 199.0, 200.0, 5_000.0] {
            let s = presentation.style(offset, CardStatus::Failed);
            assert_eq!(s.container_height, ERROR_CONTAINER_HEIGHT);
            assert_eq!(s.balance_card.height, ERROR_CARD_HEIGHT);
            assert_eq!(s.balance_card.width, W - 40.0);
            assert_eq!(s.balance_card.translate_x, 0.0);
            assert_eq!(s.balance_card.translate_y, 0.0);
            assert_eq!(s.menu_icon_opacity, 0.0);
            assert!(s.credit_card.is_none());
            assert!(s.actions.is_none());
        }
    }

    #[test]
    fn test_menu_icon_hidden_while_loading() {
        let s = CardPresentation::new(W).style(COLLAPSED_AT, CardStatus::Loading);
        assert_eq!(s.menu_icon_opacity, 0.0);
        // Everything else still follows the scroll
        assert_eq!(s.container_height, 75.0);
        assert!(s.credit_card.is_some());
    }
}
