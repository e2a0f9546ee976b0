//! Data models
//!
//! Shared between alta-server and the admin frontend (via API).
//! Wire format is camelCase JSON; ids are store-assigned strings.

pub mod cash;
pub mod client;
pub mod currency;
pub mod sale;
pub mod site_config;
pub mod stock;
pub mod technical_service;
pub mod transaction;

// Re-exports
pub use cash::*;
pub use client::*;
pub use currency::*;
pub use sale::*;
pub use site_config::*;
pub use stock::*;
pub use technical_service::*;
pub use transaction::*;
