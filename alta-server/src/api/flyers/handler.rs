//! Site Configuration API Handlers

use axum::{Json, extract::State};
use shared::models::SiteConfig;

use crate::state::AppState;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_NAME_LEN, validate_text};

/// GET /api/flyers
pub async fn get(State(state): State<AppState>) -> AppResult<Json<SiteConfig>> {
    let config = state.flyers.get(state.store()).await?;
    Ok(Json(config))
}

/// PUT /api/flyers - replace banners and hero slides
pub async fn put(
    State(state): State<AppState>,
    Json(payload): Json<SiteConfig>,
) -> AppResult<Json<SiteConfig>> {
    for banner in &payload.banners {
        validate_text(&banner.title, "banners.title", MAX_NAME_LEN)?;
    }
    for slide in &payload.hero_slides {
        validate_text(&slide.title, "heroSlides.title", MAX_NAME_LEN)?;
        validate_text(&slide.subtitle, "heroSlides.subtitle", MAX_NAME_LEN)?;
    }
    let config = state.flyers.put(state.store(), payload).await?;
    Ok(Json(config))
}
