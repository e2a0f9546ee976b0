//! Cash Register Models (balances and closings)

use super::currency::{Currency, CurrencyMap};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-currency rollup of the register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceItem {
    pub income: Decimal,
    pub expense: Decimal,
    /// Owed to the business, tracked apart from `balance`
    pub receivable: Decimal,
    /// Owed by the business, tracked apart from `balance`
    pub payable: Decimal,
    /// income - expense
    pub balance: Decimal,
}

/// Rollup for every currency
pub type CashBalance = CurrencyMap<BalanceItem>;

/// Income, expense and balance for one currency on one calendar day.
/// Derived on every load, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyBreakdown {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

/// Result of counting the register against the expected amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClosingStatus {
    /// Counted amount matches
    #[default]
    Correcto,
    /// Short
    Faltante,
    /// Over
    Sobrante,
}

impl ClosingStatus {
    /// Classify `actual - expected`
    pub fn from_difference(difference: Decimal) -> Self {
        if difference.is_zero() {
            Self::Correcto
        } else if difference.is_sign_negative() {
            Self::Faltante
        } else {
            Self::Sobrante
        }
    }
}

/// Frozen snapshot finalizing a register period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashClosing {
    #[serde(default)]
    pub id: String,
    /// Business calendar date of the closing
    pub date: NaiveDate,
    pub user: String,
    pub status: ClosingStatus,
    /// actual - expected
    pub difference: Decimal,
    #[serde(default)]
    pub notes: String,
    /// Copy of the register at closing time
    pub balance: CashBalance,
    /// Currency that was counted
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub expected: Decimal,
    #[serde(default)]
    pub actual: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Close register payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashClosingCreate {
    pub user: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub currency: Currency,
    /// Amount physically counted
    pub actual: Decimal,
}
