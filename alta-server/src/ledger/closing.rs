//! Open register and closings

use super::balance::rollup;
use crate::error::ServiceResult;
use crate::repository::{cash_transaction, closing as closing_repo, sale, to_body};
use crate::store::{DocumentStore, WriteOp, collections};
use crate::utils::time::today;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_non_negative, validate_required_text, validate_text,
};
use chrono::Utc;
use chrono_tz::Tz;
use serde_json::json;
use shared::error::ErrorCode;
use shared::models::{CashBalance, CashClosing, CashClosingCreate, ClosingStatus, Sale, Transaction};
use shared::util::new_document_id;

/// Everything not yet folded into a closing
#[derive(Debug, Clone, Default)]
pub struct OpenRegister {
    /// `cashTransactions` rows without a closing id
    pub transactions: Vec<Transaction>,
    /// Sales without a closing id
    pub sales: Vec<Sale>,
}

impl OpenRegister {
    pub async fn load(store: &dyn DocumentStore) -> ServiceResult<Self> {
        let (transactions, sales) = futures::try_join!(
            cash_transaction::find_open(store),
            sale::find_open(store)
        )?;
        Ok(Self {
            transactions,
            sales,
        })
    }

    /// Ledger view of the register: manual rows plus sale mirrors not
    /// already mirrored by a row
    pub fn ledger(&self) -> Vec<Transaction> {
        let mut rows = self.transactions.clone();
        rows.extend(
            self.sales
                .iter()
                .filter(|s| !self.transactions.iter().any(|tx| tx.reference == s.id))
                .map(Sale::mirror),
        );
        rows
    }

    pub fn balance(&self) -> CashBalance {
        rollup(&self.ledger())
    }
}

/// Close the register: freeze the balance, record the count and tag every
/// open row and sale with the new closing id, all in one batch.
pub async fn close_register(
    store: &dyn DocumentStore,
    payload: CashClosingCreate,
    tz: Tz,
) -> ServiceResult<CashClosing> {
    validate_required_text(&payload.user, "user", MAX_NAME_LEN)?;
    validate_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
    validate_non_negative(payload.actual, "actual", ErrorCode::ClosingInvalidAmount)?;

    let register = OpenRegister::load(store).await?;
    let balance = register.balance();
    let expected = balance[payload.currency].balance;
    let difference = payload.actual - expected;
    let now = Utc::now();

    let closing = CashClosing {
        id: new_document_id(),
        date: today(tz),
        user: payload.user,
        status: ClosingStatus::from_difference(difference),
        difference,
        notes: payload.notes,
        balance,
        currency: payload.currency,
        expected,
        actual: payload.actual,
        created_at: now,
        updated_at: now,
    };

    let tag = json!({ "closingId": closing.id });
    let mut ops = vec![WriteOp::set(closing_repo::COLLECTION, &closing.id, to_body(&closing)?)];
    ops.extend(
        register
            .transactions
            .iter()
            .map(|tx| WriteOp::update(collections::CASH_TRANSACTIONS, &tx.id, tag.clone())),
    );
    ops.extend(
        register
            .sales
            .iter()
            .map(|s| WriteOp::update(collections::SALES, &s.id, tag.clone())),
    );
    store.batch(ops).await?;

    tracing::info!(
        closing_id = %closing.id,
        currency = %closing.currency,
        expected = %closing.expected,
        actual = %closing.actual,
        status = ?closing.status,
        transactions = register.transactions.len(),
        sales = register.sales.len(),
        "Cash register closed"
    );

    Ok(closing)
}
