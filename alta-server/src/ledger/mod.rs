//! Cash ledger
//!
//! - [`aggregate`]: per-currency daily breakdown
//! - [`balance`]: open-register rollup with receivables and payables
//! - [`deletion`]: deletes a transaction from whichever collection owns it
//! - [`daily`]: one calendar day of the ledger, fail-safe on load
//! - [`closing`]: closes the open register into a frozen snapshot

pub mod aggregate;
pub mod balance;
pub mod closing;
pub mod daily;
pub mod deletion;

pub use aggregate::{aggregate, sort_for_display};
pub use balance::rollup;
pub use daily::DailyLedger;
pub use deletion::{DeletionCoordinator, DeletionError, DeletionOutcome};
