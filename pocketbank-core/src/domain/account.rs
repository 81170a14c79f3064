//! Card domain model

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Factor applied to the raw balance before display.
///
/// The account service reports balances in a unit a thousand times smaller
/// than the one shown on the card. Whether that is intentional is still an
/// open product question, so the scaling is kept as observed.
pub const BALANCE_DISPLAY_SCALE: i64 = 1000;

/// Payment card attached to the signed-in account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardInfo {
    pub card_balance: Decimal,
    pub card_number: String,
    pub full_name: String,
    pub card_expiry_date: String,
}

impl CardInfo {
    /// Balance as it appears on the balance card, rounded half away from
    /// zero. Saturates at the bounds of `Decimal`.
    pub fn display_balance(&self) -> Decimal {
        let scaled = self
            .card_balance
            .checked_mul(Decimal::from(BALANCE_DISPLAY_SCALE))
            .unwrap_or(if self.card_balance.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            });
        scaled.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Formatted balance, e.g. `£4823.47`
    pub fn formatted_balance(&self) -> String {
        format!("£{:.2}", self.display_balance())
    }

    /// Card holder name as printed on the card
    pub fn holder(&self) -> String {
        self.full_name.to_uppercase()
    }

    /// Card number with everything but the last four digits masked
    pub fn masked_number(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() <= 4 {
            return self.card_number.clone();
        }
        let last4: String = digits[digits.len() - 4..].iter().collect();
        format!("•••• •••• •••• {}", last4)
    }

    /// Validate card data
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.card_number.trim().is_empty() {
            return Err("card number cannot be empty");
        }
        if self.full_name.trim().is_empty() {
            return Err("card holder cannot be empty");
        }
        Ok(())
    }
}
