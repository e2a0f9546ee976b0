//! Manual Cash Transaction API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use shared::models::{Transaction, TransactionCreate};

use crate::repository::cash_transaction;
use crate::state::AppState;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_non_negative, validate_optional_text,
    validate_positive_amount, validate_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

fn validate_create(payload: &TransactionCreate) -> AppResult<()> {
    validate_positive_amount(payload.amount, "amount")?;
    validate_non_negative(payload.receivable, "receivable", ErrorCode::TransactionInvalidAmount)?;
    if let Some(rate) = payload.exchange_rate
        && rate <= Decimal::ZERO
    {
        return Err(AppError::with_message(
            ErrorCode::TransactionInvalidAmount,
            format!("exchangeRate must be positive, got {rate}"),
        )
        .with_detail("field", "exchangeRate"));
    }
    validate_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_text(&payload.user, "user", MAX_NAME_LEN)?;
    validate_optional_text(&payload.category, "category", MAX_NAME_LEN)?;
    Ok(())
}

/// POST /api/cash-transactions - record a manual income or expense
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<TransactionCreate>,
) -> AppResult<Json<Transaction>> {
    validate_create(&payload)?;
    let tx = cash_transaction::create(state.store(), payload.into()).await?;
    tracing::info!(
        id = %tx.id,
        kind = ?tx.kind,
        currency = %tx.currency,
        amount = %tx.amount,
        "Cash transaction recorded"
    );
    Ok(Json(tx))
}

/// DELETE /api/cash-transactions/:id - delete a ledger row by its own id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    cash_transaction::delete(state.store(), &id)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                AppError::with_message(
                    ErrorCode::TransactionNotFound,
                    format!("Transaction {id} not found"),
                )
                .with_detail("id", id.clone())
            } else {
                e.into()
            }
        })?;
    tracing::info!(id = %id, "Cash transaction deleted");
    Ok(Json(true))
}
