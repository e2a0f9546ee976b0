//! Utility module
//!
//! - [`time`]: business time zone conversions
//! - [`validation`]: input checks shared by the handlers
//! - [`logger`]: tracing subscriber setup

pub mod logger;
pub mod time;
pub mod validation;

pub use shared::error::{AppError, AppResult, ErrorCode};
