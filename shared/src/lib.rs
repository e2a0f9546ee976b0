//! Shared types for the Alta back-office
//!
//! Domain models, the unified error type and small utilities used by
//! alta-server and its tests.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
