//! Featured Products API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::cache::Featured;
use crate::cache::catalog::featured_limit;
use crate::state::AppState;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<usize>,
}

/// GET /api/featured?limit=n - liquidation and weekly-offer lists
pub async fn get_featured(
    State(state): State<AppState>,
    Query(query): Query<FeaturedQuery>,
) -> AppResult<Json<Featured>> {
    let featured = state
        .catalog
        .featured(state.store(), featured_limit(query.limit))
        .await?;
    Ok(Json(featured))
}
