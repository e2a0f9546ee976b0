//! alta-server - back-office cash ledger service for Alta Telefonía
//!
//! # Modules
//!
//! - [`store`]: document store port with SQLite and in-memory backends
//! - [`repository`]: typed access to each collection
//! - [`ledger`]: daily breakdown, deletion, open register and closings
//! - [`stats`]: dashboard statistics
//! - [`cache`]: versioned catalog and site configuration caches
//! - [`api`]: axum routes and handlers

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod ledger;
pub mod repository;
pub mod state;
pub mod stats;
pub mod store;
pub mod utils;

pub use config::Config;
pub use state::AppState;
