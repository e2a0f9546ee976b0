//! Transaction deletion across `sales` and `cashTransactions`
//!
//! A ledger row is either owned by `cashTransactions` or is a mirror of a
//! sales record. Mirrors are deleted through `sales` first; if that fails,
//! or the row is manual, or the id is not among the loaded rows, the delete
//! goes to `cashTransactions` by the row's own id. Nothing is rolled back
//! and the caller's list is left untouched.

use crate::repository::{cash_transaction, sale};
use crate::store::{DocumentStore, StoreError};
use shared::error::{AppError, ErrorCode};
use shared::models::{LedgerEntry, Transaction};
use thiserror::Error;

/// Which record was removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    /// The sales record behind a mirror row
    SaleRemoved { sale_id: String },
    /// A `cashTransactions` row
    LedgerRemoved { id: String },
}

/// Every attempted path failed
#[derive(Debug, Error)]
#[error("transaction {id} could not be deleted: {ledger_error}")]
pub struct DeletionError {
    pub id: String,
    /// Set when the sales path was attempted first
    pub sale_error: Option<StoreError>,
    pub ledger_error: StoreError,
}

impl DeletionError {
    /// No attempted path found anything to delete
    pub fn nothing_found(&self) -> bool {
        self.ledger_error.is_not_found()
            && self.sale_error.as_ref().is_none_or(StoreError::is_not_found)
    }
}

impl From<DeletionError> for AppError {
    fn from(err: DeletionError) -> Self {
        if err.nothing_found() {
            return AppError::with_message(
                ErrorCode::TransactionNotFound,
                format!("Transaction {} not found", err.id),
            )
            .with_detail("id", err.id);
        }
        tracing::error!(
            id = %err.id,
            sale_error = ?err.sale_error,
            ledger_error = %err.ledger_error,
            "Transaction deletion failed on every path"
        );
        AppError::new(ErrorCode::TransactionDeleteFailed).with_detail("id", err.id)
    }
}

/// Deletes a transaction from whichever collection owns it
pub struct DeletionCoordinator<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> DeletionCoordinator<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Delete `id`, using `loaded` to tell mirrors from manual rows
    pub async fn delete(
        &self,
        id: &str,
        loaded: &[Transaction],
    ) -> Result<DeletionOutcome, DeletionError> {
        let entry = loaded
            .iter()
            .find(|tx| tx.id == id)
            .cloned()
            .map(LedgerEntry::from);

        let sale_error = match entry {
            Some(LedgerEntry::SaleMirror { sale_id, .. }) => {
                match sale::delete(self.store, &sale_id).await {
                    Ok(()) => {
                        tracing::info!(id, sale_id = %sale_id, "Deleted sale behind ledger row");
                        return Ok(DeletionOutcome::SaleRemoved { sale_id });
                    }
                    Err(e) => {
                        // A ledger row sharing this id would be deleted instead
                        tracing::warn!(
                            id,
                            sale_id = %sale_id,
                            error = %e,
                            "Sale delete failed, falling back to cashTransactions"
                        );
                        Some(e)
                    }
                }
            }
            Some(LedgerEntry::Manual(_)) => None,
            None => {
                tracing::debug!(id, "Transaction not among loaded rows, deleting from cashTransactions");
                None
            }
        };

        match cash_transaction::delete(self.store, id).await {
            Ok(()) => {
                tracing::info!(id, "Deleted cash transaction");
                Ok(DeletionOutcome::LedgerRemoved { id: id.to_string() })
            }
            Err(ledger_error) => Err(DeletionError {
                id: id.to_string(),
                sale_error,
                ledger_error,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreResult, WriteOp, collections};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::{Value, json};
    use std::collections::HashSet;

    /// Memory store that records deletes and can fail them per collection
    #[derive(Default)]
    struct ProbeStore {
        inner: MemoryStore,
        failing: HashSet<&'static str>,
        deletes: Mutex<Vec<(String, String)>>,
    }

    impl ProbeStore {
        fn failing(collections: &[&'static str]) -> Self {
            Self {
                failing: collections.iter().copied().collect(),
                ..Default::default()
            }
        }

        fn deletes(&self) -> Vec<(String, String)> {
            self.deletes.lock().clone()
        }
    }

    #[async_trait]
    impl DocumentStore for ProbeStore {
        async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
            self.inner.get(collection, id).await
        }
        async fn list(&self, collection: &str) -> StoreResult<Vec<Value>> {
            self.inner.list(collection).await
        }
        async fn create(&self, collection: &str, data: Value) -> StoreResult<String> {
            self.inner.create(collection, data).await
        }
        async fn set(&self, collection: &str, id: &str, data: Value) -> StoreResult<()> {
            self.inner.set(collection, id, data).await
        }
        async fn update(&self, collection: &str, id: &str, data: Value) -> StoreResult<()> {
            self.inner.update(collection, id, data).await
        }
        async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
            self.deletes
                .lock()
                .push((collection.to_string(), id.to_string()));
            if self.failing.contains(collection) {
                return Err(StoreError::Backend("network unreachable".into()));
            }
            self.inner.delete(collection, id).await
        }
        async fn batch(&self, ops: Vec<WriteOp>) -> StoreResult<()> {
            self.inner.batch(ops).await
        }
    }

    fn mirror(id: &str, sale_id: &str) -> Transaction {
        Transaction {
            id: id.into(),
            reference: sale_id.into(),
            ..Default::default()
        }
    }

    fn manual(id: &str) -> Transaction {
        Transaction {
            id: id.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_sale_delete_short_circuits() {
        let store = ProbeStore::default();
        store.set(collections::SALES, "sale123", json!({})).await.unwrap();
        store
            .set(collections::CASH_TRANSACTIONS, "sale123", json!({}))
            .await
            .unwrap();

        let loaded = vec![mirror("sale123", "sale123")];
        let outcome = DeletionCoordinator::new(&store)
            .delete("sale123", &loaded)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            DeletionOutcome::SaleRemoved {
                sale_id: "sale123".into()
            }
        );
        assert_eq!(
            store.deletes(),
            vec![(collections::SALES.to_string(), "sale123".to_string())]
        );
        // The ledger path was never attempted
        assert!(
            store
                .get(collections::CASH_TRANSACTIONS, "sale123")
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_manual_row_only_touches_ledger() {
        let store = ProbeStore::default();
        store
            .set(collections::CASH_TRANSACTIONS, "m1", json!({}))
            .await
            .unwrap();

        let outcome = DeletionCoordinator::new(&store)
            .delete("m1", &[manual("m1")])
            .await
            .unwrap();

        assert_eq!(outcome, DeletionOutcome::LedgerRemoved { id: "m1".into() });
        assert_eq!(
            store.deletes(),
            vec![(collections::CASH_TRANSACTIONS.to_string(), "m1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_failed_sale_delete_falls_back_to_ledger() {
        let store = ProbeStore::failing(&[collections::SALES]);
        store
            .set(collections::CASH_TRANSACTIONS, "tx-9", json!({}))
            .await
            .unwrap();

        let outcome = DeletionCoordinator::new(&store)
            .delete("tx-9", &[mirror("tx-9", "sale123")])
            .await
            .unwrap();

        assert_eq!(outcome, DeletionOutcome::LedgerRemoved { id: "tx-9".into() });
        assert_eq!(
            store.deletes(),
            vec![
                (collections::SALES.to_string(), "sale123".to_string()),
                (collections::CASH_TRANSACTIONS.to_string(), "tx-9".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_both_paths_failing_returns_error() {
        let store = ProbeStore::failing(&[collections::SALES, collections::CASH_TRANSACTIONS]);
        let loaded = vec![mirror("tx-9", "sale123")];

        let err = DeletionCoordinator::new(&store)
            .delete("tx-9", &loaded)
            .await
            .unwrap_err();

        assert_eq!(err.id, "tx-9");
        assert!(err.sale_error.is_some());
        assert!(!err.nothing_found());
        assert_eq!(store.deletes().len(), 2);
        assert_eq!(loaded.len(), 1);

        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::TransactionDeleteFailed);
    }

    #[tokio::test]
    async fn test_unknown_id_goes_to_ledger() {
        let store = ProbeStore::default();
        let err = DeletionCoordinator::new(&store)
            .delete("ghost", &[manual("m1")])
            .await
            .unwrap_err();

        assert!(err.sale_error.is_none());
        assert!(err.nothing_found());
        assert_eq!(
            store.deletes(),
            vec![(collections::CASH_TRANSACTIONS.to_string(), "ghost".to_string())]
        );

        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::TransactionNotFound);
    }
}
