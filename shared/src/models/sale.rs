//! Sale Model

use super::currency::Currency;
use super::transaction::{Transaction, TransactionType};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sale line item
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaleItem {
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
    pub price: Decimal,
}

/// Completed sale (collection `sales`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sale {
    pub id: String,
    pub date: DateTime<Utc>,
    pub total: Decimal,
    pub currency: Currency,
    /// `cash`, `card`, `transfer` or a free-form label
    pub payment_method: String,
    pub client_name: String,
    pub user: String,
    /// Empty while the sale belongs to the open register
    pub closing_id: String,
    pub items: Vec<SaleItem>,
}

impl Default for Sale {
    fn default() -> Self {
        Self {
            id: String::new(),
            date: Utc::now(),
            total: Decimal::ZERO,
            currency: Currency::default(),
            payment_method: String::new(),
            client_name: String::new(),
            user: String::new(),
            closing_id: String::new(),
            items: Vec::new(),
        }
    }
}

impl Sale {
    /// The `Venta` ledger row this sale shows up as. Its id and reference
    /// are both the sale id.
    pub fn mirror(&self) -> Transaction {
        let description = if self.client_name.is_empty() {
            format!("Venta #{}", self.id)
        } else {
            format!("Venta #{} - {}", self.id, self.client_name)
        };
        Transaction {
            id: self.id.clone(),
            closing_id: self.closing_id.clone(),
            time: self.date,
            kind: TransactionType::Venta,
            amount: self.total.abs(),
            currency: self.currency,
            description,
            user: self.user.clone(),
            reference: self.id.clone(),
            category: Some("Ventas".to_string()),
            ..Default::default()
        }
    }
}
