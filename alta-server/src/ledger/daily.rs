//! One calendar day of the ledger

use super::aggregate::{aggregate, sort_for_display};
use super::deletion::{DeletionCoordinator, DeletionError, DeletionOutcome};
use crate::repository::{cash_transaction, sale};
use crate::store::{DocumentStore, StoreResult};
use crate::utils::time::local_date;
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;
use shared::models::{CurrencyMap, DailyBreakdown, Transaction};
use std::collections::HashSet;

/// Transactions of one business day and their breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyLedger {
    pub date: NaiveDate,
    /// Newest first
    pub transactions: Vec<Transaction>,
    pub breakdown: CurrencyMap<DailyBreakdown>,
}

impl DailyLedger {
    /// A day with no transactions: every currency zeroed
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            transactions: Vec::new(),
            breakdown: CurrencyMap::default(),
        }
    }

    pub fn from_transactions(date: NaiveDate, mut transactions: Vec<Transaction>) -> Self {
        let breakdown = aggregate(&transactions);
        sort_for_display(&mut transactions);
        Self {
            date,
            transactions,
            breakdown,
        }
    }

    /// Load the day. A failed fetch yields the empty day and a warning,
    /// never an error.
    pub async fn load(store: &dyn DocumentStore, date: NaiveDate, tz: Tz) -> Self {
        match fetch_day(store, date, tz).await {
            Ok(transactions) => Self::from_transactions(date, transactions),
            Err(e) => {
                tracing::warn!(%date, error = %e, "Failed to load ledger day, showing empty day");
                Self::empty(date)
            }
        }
    }

    /// Delete a transaction of this day. On success the row is dropped
    /// and the breakdown recomputed; on failure nothing changes.
    ///
    /// A `cashTransactions` row that references a sale only loses its sale,
    /// the row itself stays stored, so the day is read back from the store.
    pub async fn delete_transaction(
        &mut self,
        store: &dyn DocumentStore,
        id: &str,
        tz: Tz,
    ) -> Result<DeletionOutcome, DeletionError> {
        let outcome = DeletionCoordinator::new(store)
            .delete(id, &self.transactions)
            .await?;
        match &outcome {
            DeletionOutcome::SaleRemoved { sale_id } if sale_id != id => {
                match fetch_day(store, self.date, tz).await {
                    Ok(transactions) => *self = Self::from_transactions(self.date, transactions),
                    Err(e) => {
                        tracing::warn!(date = %self.date, id, error = %e, "Failed to reload ledger day after delete");
                        self.transactions.retain(|tx| tx.id != *sale_id);
                        self.breakdown = aggregate(&self.transactions);
                    }
                }
            }
            _ => {
                self.transactions.retain(|tx| tx.id != id);
                self.breakdown = aggregate(&self.transactions);
            }
        }
        Ok(outcome)
    }
}

/// Manual rows and sale mirrors whose timestamp falls on `date` in `tz`.
///
/// A sale already mirrored by a `cashTransactions` row (same reference) is
/// not listed twice.
pub async fn fetch_day(
    store: &dyn DocumentStore,
    date: NaiveDate,
    tz: Tz,
) -> StoreResult<Vec<Transaction>> {
    let (manual, sales) = futures::try_join!(
        cash_transaction::find_all(store),
        sale::find_all(store)
    )?;

    let mut day: Vec<Transaction> = manual
        .into_iter()
        .filter(|tx| local_date(tx.time, tz) == date)
        .collect();

    let mirrored: HashSet<String> = day
        .iter()
        .filter(|tx| tx.is_sale_mirror())
        .map(|tx| tx.reference.clone())
        .collect();

    day.extend(
        sales
            .iter()
            .filter(|s| local_date(s.date, tz) == date && !mirrored.contains(&s.id))
            .map(|s| s.mirror()),
    );
    Ok(day)
}
