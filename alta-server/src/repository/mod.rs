//! Repository Module
//!
//! Typed access to each collection on top of the [`DocumentStore`] port.
//! Functions take `&dyn DocumentStore` so both backends share one code path.
//!
//! [`DocumentStore`]: crate::store::DocumentStore

pub mod cash_transaction;
pub mod client;
pub mod closing;
pub mod sale;
pub mod site_config;
pub mod stock;
pub mod technical_service;

use crate::store::{StoreError, StoreResult};
use serde::Serialize;
use serde_json::Value;

/// Serialize a model into a storage body (the store drops the id)
pub(crate) fn to_body<T: Serialize>(model: &T) -> StoreResult<Value> {
    serde_json::to_value(model).map_err(StoreError::from)
}
