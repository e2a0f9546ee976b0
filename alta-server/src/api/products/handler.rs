//! Product API Handlers
//!
//! Every write invalidates the catalog cache.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{StockItem, StockItemCreate, StockItemUpdate};

use crate::repository::stock;
use crate::state::AppState;
use crate::store::StoreError;
use crate::utils::validation::{MAX_NAME_LEN, validate_non_negative, validate_required_text, validate_text};
use crate::utils::{AppError, AppResult, ErrorCode};

fn product_not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::ProductNotFound, format!("Product {id} not found"))
        .with_detail("id", id)
}

fn map_store_error(id: &str, err: StoreError) -> AppError {
    if err.is_not_found() {
        product_not_found(id)
    } else {
        err.into()
    }
}

fn validate_item(item: &StockItem) -> AppResult<()> {
    validate_required_text(&item.name, "name", MAX_NAME_LEN)?;
    validate_text(&item.category, "category", MAX_NAME_LEN)?;
    validate_non_negative(item.price, "price", ErrorCode::ProductInvalidPrice)?;
    if item.quantity < 0 {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidQuantity,
            format!("quantity must be non-negative, got {}", item.quantity),
        )
        .with_detail("field", "quantity"));
    }
    Ok(())
}

/// GET /api/products - every product
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<StockItem>>> {
    let items = stock::find_all(state.store()).await?;
    Ok(Json(items))
}

/// GET /api/products/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<StockItem>> {
    let item = stock::find_by_id(state.store(), &id)
        .await?
        .ok_or_else(|| product_not_found(&id))?;
    Ok(Json(item))
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<StockItemCreate>,
) -> AppResult<Json<StockItem>> {
    let item = StockItem::from_create(payload);
    validate_item(&item)?;
    let item = stock::create(state.store(), item).await?;
    state.catalog.invalidate();
    tracing::info!(id = %item.id, name = %item.name, "Product created");
    Ok(Json(item))
}

/// PUT /api/products/:id - apply the fields present in the body
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StockItemUpdate>,
) -> AppResult<Json<StockItem>> {
    let mut item = stock::find_by_id(state.store(), &id)
        .await?
        .ok_or_else(|| product_not_found(&id))?;
    item.apply(payload);
    validate_item(&item)?;
    stock::update(state.store(), &item)
        .await
        .map_err(|e| map_store_error(&id, e))?;
    state.catalog.invalidate();
    tracing::info!(id = %item.id, "Product updated");
    Ok(Json(item))
}

/// DELETE /api/products/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    stock::delete(state.store(), &id)
        .await
        .map_err(|e| map_store_error(&id, e))?;
    state.catalog.invalidate();
    tracing::info!(id = %id, "Product deleted");
    Ok(Json(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_item() {
        let item = StockItem {
            name: "Cargador".into(),
            price: dec!(12.5),
            quantity: 3,
            ..Default::default()
        };
        assert!(validate_item(&item).is_ok());

        let negative_price = StockItem {
            price: dec!(-1),
            ..item.clone()
        };
        assert_eq!(
            validate_item(&negative_price).unwrap_err().code,
            ErrorCode::ProductInvalidPrice
        );

        let negative_quantity = StockItem {
            quantity: -2,
            ..item.clone()
        };
        assert_eq!(
            validate_item(&negative_quantity).unwrap_err().code,
            ErrorCode::ProductInvalidQuantity
        );

        let unnamed = StockItem {
            name: "  ".into(),
            ..item
        };
        assert_eq!(
            validate_item(&unnamed).unwrap_err().code,
            ErrorCode::ValidationFailed
        );
    }
}
