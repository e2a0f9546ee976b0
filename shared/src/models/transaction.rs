//! Cash Transaction Model (ledger rows)

use super::currency::Currency;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction kind. Direction is implied by the kind, never by the sign
/// of the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransactionType {
    #[default]
    Ingreso,
    Egreso,
    Venta,
    Compra,
    Ajuste,
}

impl TransactionType {
    /// Money coming into the register (`Ingreso`, `Venta`)
    pub const fn is_inflow(&self) -> bool {
        matches!(self, Self::Ingreso | Self::Venta)
    }

    /// Money leaving the register (`Egreso`)
    pub const fn is_outflow(&self) -> bool {
        matches!(self, Self::Egreso)
    }
}

/// A single monetary event.
///
/// Every field has a safe default, and deserialization fills missing fields
/// from [`Transaction::default`], so partial documents always decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transaction {
    pub id: String,
    /// Empty while the transaction belongs to the open register
    pub closing_id: String,
    pub time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Positive magnitude
    pub amount: Decimal,
    pub currency: Currency,
    pub description: String,
    pub user: String,
    /// Sale id when this row mirrors a sales record, empty otherwise
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Amount still owed when `is_debt` is set
    pub receivable: Decimal,
    pub is_debt: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Decimal>,
}

impl Default for Transaction {
    fn default() -> Self {
        Self {
            id: String::new(),
            closing_id: String::new(),
            time: Utc::now(),
            kind: TransactionType::default(),
            amount: Decimal::ZERO,
            currency: Currency::default(),
            description: String::new(),
            user: String::new(),
            reference: String::new(),
            category: None,
            receivable: Decimal::ZERO,
            is_debt: false,
            exchange_rate: None,
        }
    }
}

impl Transaction {
    /// Storage payload: every field except the id, which the store assigns.
    pub fn to_record(&self) -> serde_json::Result<serde_json::Value> {
        let mut value = serde_json::to_value(self)?;
        if let Some(obj) = value.as_object_mut() {
            obj.remove("id");
        }
        Ok(value)
    }

    /// Whether this row mirrors a sales record
    pub fn is_sale_mirror(&self) -> bool {
        !self.reference.is_empty()
    }

    /// Outstanding debt carried by this row, if any
    pub fn outstanding_debt(&self) -> Option<Decimal> {
        (self.is_debt && self.receivable > Decimal::ZERO).then_some(self.receivable)
    }
}

/// A transaction classified by the collection that owns it.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEntry {
    /// Row owned by `cashTransactions`
    Manual(Transaction),
    /// View onto a `sales` record
    SaleMirror {
        sale_id: String,
        transaction: Transaction,
    },
}

impl From<Transaction> for LedgerEntry {
    fn from(transaction: Transaction) -> Self {
        if transaction.is_sale_mirror() {
            LedgerEntry::SaleMirror {
                sale_id: transaction.reference.clone(),
                transaction,
            }
        } else {
            LedgerEntry::Manual(transaction)
        }
    }
}

impl LedgerEntry {
    pub fn transaction(&self) -> &Transaction {
        match self {
            LedgerEntry::Manual(tx) => tx,
            LedgerEntry::SaleMirror { transaction, .. } => transaction,
        }
    }

    pub fn into_transaction(self) -> Transaction {
        match self {
            LedgerEntry::Manual(tx) => tx,
            LedgerEntry::SaleMirror { transaction, .. } => transaction,
        }
    }

    pub fn id(&self) -> &str {
        &self.transaction().id
    }
}

/// Create manual transaction payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCreate {
    /// Defaults to now
    pub time: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Decimal,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub user: String,
    pub category: Option<String>,
    #[serde(default)]
    pub receivable: Decimal,
    #[serde(default)]
    pub is_debt: bool,
    pub exchange_rate: Option<Decimal>,
}

impl From<TransactionCreate> for Transaction {
    fn from(payload: TransactionCreate) -> Self {
        Self {
            time: payload.time.unwrap_or_else(Utc::now),
            kind: payload.kind,
            amount: payload.amount,
            currency: payload.currency,
            description: payload.description,
            user: payload.user,
            category: payload.category,
            receivable: payload.receivable,
            is_debt: payload.is_debt,
            exchange_rate: payload.exchange_rate,
            ..Default::default()
        }
    }
}
