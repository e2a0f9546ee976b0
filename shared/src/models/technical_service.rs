//! Technical Service Model (repair orders)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ServiceStatus {
    Pagado,
    #[default]
    Pendiente,
    #[serde(rename = "En proceso")]
    EnProceso,
}

/// Repair order (collection `technicalServices`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnicalService {
    pub id: String,
    pub client_name: String,
    pub device: String,
    pub status: ServiceStatus,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Default for TechnicalService {
    fn default() -> Self {
        Self {
            id: String::new(),
            client_name: String::new(),
            device: String::new(),
            status: ServiceStatus::default(),
            total: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }
}
