//! Dashboard API Handlers

use axum::{Json, extract::State};

use crate::state::AppState;
use crate::stats::{DashboardInput, DashboardPayload, compute};
use crate::utils::time::today;
use crate::utils::{AppError, AppResult};

/// GET /api/dashboard/stats
///
/// All or nothing: any load or aggregation failure is a generic 500.
pub async fn get_stats(State(state): State<AppState>) -> AppResult<Json<DashboardPayload>> {
    let tz = state.config.timezone;
    let input = DashboardInput::load(state.store()).await.map_err(failed)?;
    let payload = compute(&input, today(tz), tz).map_err(failed)?;
    Ok(Json(payload))
}

fn failed(e: impl std::fmt::Display) -> AppError {
    tracing::error!(error = %e, "Dashboard statistics failed");
    AppError::internal("Failed to compute dashboard statistics")
}
