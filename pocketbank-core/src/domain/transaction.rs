//! Transaction domain model

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A single card transaction, either a debit to a vendor or a credit from a creditor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default)]
    pub vendor_logo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creditor: Option<String>,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_debit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_credit: Option<bool>,
}

impl Transaction {
    /// Create a debit paid to `vendor`
    pub fn debit(id: impl Into<String>, vendor: impl Into<String>, amount: Decimal, date: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            vendor: Some(vendor.into()),
            vendor_logo: String::new(),
            creditor: None,
            amount,
            date,
            is_debit: Some(true),
            is_credit: None,
        }
    }

    /// Create a credit received from `creditor`
    pub fn credit(id: impl Into<String>, creditor: impl Into<String>, amount: Decimal, date: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            vendor: None,
            vendor_logo: String::new(),
            creditor: Some(creditor.into()),
            amount,
            date,
            is_debit: None,
            is_credit: Some(true),
        }
    }

    pub fn is_credit(&self) -> bool {
        self.is_credit.unwrap_or(false)
    }

    /// Vendor name, falling back to the creditor
    pub fn title(&self) -> &str {
        self.vendor
            .as_deref()
            .filter(|v| !v.is_empty())
            .or(self.creditor.as_deref())
            .unwrap_or("")
    }

    /// Signed amount label, e.g. `+£12.00` or `-£3.50`
    pub fn formatted_amount(&self) -> String {
        let sign = if self.is_credit() { '+' } else { '-' };
        let amount = self
            .amount
            .abs()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{}£{:.2}", sign, amount)
    }

    /// Date label in the machine's local time, e.g. `2 Jan 24 • 14:05`
    pub fn formatted_date(&self) -> String {
        self.formatted_date_in(&Local)
    }

    pub fn formatted_date_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: Display,
    {
        let date = self.date.with_timezone(tz);
        format!("{} • {}", date.format("%-d %b %y"), date.format("%H:%M"))
    }
}

/// Transactions query payload: debits and credits arrive as separate lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFeed {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub credits: Vec<Transaction>,
}

impl TransactionFeed {
    pub fn len(&self) -> usize {
        self.transactions.len() + self.credits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Debits followed by credits, newest first.
    ///
    /// The sort is stable: entries with the same date keep their relative
    /// order, debits ahead of credits.
    pub fn merged(&self) -> Vec<Transaction> {
        let mut all: Vec<Transaction> = self
            .transactions
            .iter()
            .chain(self.credits.iter())
            .cloned()
            .collect();
        sort_newest_first(&mut all);
        all
    }
}

/// Stable sort by date, descending
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_merge_sorts_descending() {
        let feed = TransactionFeed {
            transactions: vec![Transaction::debit("1", "Tesco", Decimal::new(1250, 2), at(2024, 1, 1))],
            credits: vec![Transaction::credit("2", "Payroll", Decimal::new(200000, 2), at(2024, 1, 2))],
        };

        let merged = feed.merged();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].date, at(2024, 1, 2));
        assert_eq!(merged[0].id, "2");
    }

    #[test]
    fn test_merge_is_stable_for_ties() {
        let same = at(2024, 3, 5);
        let feed = TransactionFeed {
            transactions: vec![
                Transaction::debit("a", "Cafe", Decimal::ONE, same),
                Transaction::debit("b", "Bakery", Decimal::ONE, same),
            ],
            credits: vec![Transaction::credit("c", "Refund", Decimal::ONE, same)],
        };

        let ids: Vec<String> = feed.merged().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_display_labels() {
        let debit = Transaction::debit("1", "Pret", Decimal::new(-350, 2), at(2024, 1, 2));
        assert_eq!(debit.title(), "Pret");
        assert_eq!(debit.formatted_amount(), "-£3.50");
        assert_eq!(debit.formatted_date_in(&Utc), "2 Jan 24 • 09:30");

        let credit = Transaction::credit("2", "HMRC", Decimal::new(12, 0), at(2024, 1, 2));
        assert_eq!(credit.title(), "HMRC");
        assert_eq!(credit.formatted_amount(), "+£12.00");
    }

    #[test]
    fn test_amount_rounds_half_away_from_zero() {
        let debit = Transaction::debit("1", "Pret", Decimal::new(2125, 3), at(2024, 1, 2)); // 2.125
        assert_eq!(debit.formatted_amount(), "-£2.13");
        let credit = Transaction::credit("2", "HMRC", Decimal::new(1005, 3), at(2024, 1, 2)); // 1.005
        assert_eq!(credit.formatted_amount(), "+£1.01");
    }

    #[test]
    fn test_date_label_uses_given_zone() {
        let late = Utc.with_ymd_and_hms(2024, 1, 2, 23, 30, 0).unwrap();
        let tx = Transaction::debit("1", "Pret", Decimal::ONE, late);
        let paris = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(tx.formatted_date_in(&paris), "3 Jan 24 • 00:30");
        assert_eq!(tx.formatted_date(), tx.formatted_date_in(&Local));
    }

    #[test]
    fn test_deserializes_original_shape() {
        let json = r#"{
            "id": "t1",
            "vendor": "Amazon",
            "vendor_logo": "https://logo",
            "amount": 19.99,
            "date": "2024-01-02T10:00:00Z"
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.title(), "Amazon");
        assert!(!tx.is_credit());
        assert_eq!(tx.amount, Decimal::new(1999, 2));
    }
}
