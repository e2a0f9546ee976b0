//! Stock Item Model (collection `stock`)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog product with its stock level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub quantity: i64,
    /// Listed under clearance
    pub liquidation: bool,
    /// Listed under the weekly offer
    pub weekly_offer: bool,
    pub active: bool,
    pub updated_at: DateTime<Utc>,
}

impl Default for StockItem {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            category: String::new(),
            price: Decimal::ZERO,
            quantity: 0,
            liquidation: false,
            weekly_offer: false,
            active: true,
            updated_at: Utc::now(),
        }
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItemCreate {
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub price: Decimal,
    #[serde(default)]
    pub quantity: i64,
    pub liquidation: Option<bool>,
    pub weekly_offer: Option<bool>,
    pub active: Option<bool>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItemUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i64>,
    pub liquidation: Option<bool>,
    pub weekly_offer: Option<bool>,
    pub active: Option<bool>,
}

impl StockItem {
    pub fn from_create(payload: StockItemCreate) -> Self {
        Self {
            name: payload.name,
            category: payload.category,
            price: payload.price,
            quantity: payload.quantity,
            liquidation: payload.liquidation.unwrap_or(false),
            weekly_offer: payload.weekly_offer.unwrap_or(false),
            active: payload.active.unwrap_or(true),
            ..Default::default()
        }
    }

    /// Apply the set fields of `update` and stamp `updated_at`
    pub fn apply(&mut self, update: StockItemUpdate) {
        if let Some(v) = update.name {
            self.name = v;
        }
        if let Some(v) = update.category {
            self.category = v;
        }
        if let Some(v) = update.price {
            self.price = v;
        }
        if let Some(v) = update.quantity {
            self.quantity = v;
        }
        if let Some(v) = update.liquidation {
            self.liquidation = v;
        }
        if let Some(v) = update.weekly_offer {
            self.weekly_offer = v;
        }
        if let Some(v) = update.active {
            self.active = v;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_missing_active_defaults_to_true() {
        let item: StockItem = serde_json::from_str(r#"{"name":"Cargador"}"#).unwrap();
        assert!(item.active);
        assert!(!item.liquidation);
    }

    #[test]
    fn test_apply_only_touches_set_fields() {
        let mut item = StockItem {
            name: "Cargador".into(),
            price: dec!(10),
            quantity: 3,
            ..Default::default()
        };
        item.apply(StockItemUpdate {
            quantity: Some(9),
            weekly_offer: Some(true),
            ..Default::default()
        });
        assert_eq!(item.name, "Cargador");
        assert_eq!(item.price, dec!(10));
        assert_eq!(item.quantity, 9);
        assert!(item.weekly_offer);
    }
}
