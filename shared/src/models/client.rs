//! Client Model (loyalty program)

use serde::{Deserialize, Serialize};

/// Registered client
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Loyalty points balance
    pub points: i64,
}

/// Bulk loyalty grant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyGrant {
    pub client_ids: Vec<String>,
    pub points: i64,
}
