//! Reporting aggregates

pub mod dashboard;

pub use dashboard::{DashboardError, DashboardInput, DashboardPayload, compute};
