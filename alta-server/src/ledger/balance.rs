//! Open register rollup

use shared::models::{CashBalance, Transaction, TransactionType};

/// Per-currency rollup including receivables and payables.
///
/// Income, expense and balance follow [`aggregate`](super::aggregate).
/// Outstanding debts go to `receivable` for inflows and to `payable` for
/// `Egreso`/`Compra`; they never touch `balance`.
pub fn rollup(transactions: &[Transaction]) -> CashBalance {
    let mut balance = CashBalance::default();
    for tx in transactions {
        let amount = tx.amount.abs();
        let item = &mut balance[tx.currency];
        match tx.kind {
            TransactionType::Ingreso | TransactionType::Venta => {
                item.income += amount;
                item.balance += amount;
            }
            TransactionType::Egreso => {
                item.expense += amount;
                item.balance -= amount;
            }
            TransactionType::Compra | TransactionType::Ajuste => {}
        }
        if let Some(debt) = tx.outstanding_debt() {
            match tx.kind {
                TransactionType::Ingreso | TransactionType::Venta => item.receivable += debt,
                TransactionType::Egreso | TransactionType::Compra => item.payable += debt,
                TransactionType::Ajuste => {}
            }
        }
    }
    balance
}
