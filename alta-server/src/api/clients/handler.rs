//! Client API Handlers

use axum::{Json, extract::State};
use shared::models::{Client, LoyaltyGrant};
use std::collections::{HashMap, HashSet};

use crate::repository::client;
use crate::state::AppState;
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/clients
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Client>>> {
    let clients = client::find_all(state.store()).await?;
    Ok(Json(clients))
}

/// New balances for a grant: each named client once, in request order.
/// Any unknown id rejects the whole grant.
fn plan_grant(clients: Vec<Client>, grant: &LoyaltyGrant) -> AppResult<Vec<Client>> {
    if grant.points <= 0 {
        return Err(AppError::with_message(
            ErrorCode::LoyaltyInvalidPoints,
            format!("points must be positive, got {}", grant.points),
        ));
    }
    if grant.client_ids.is_empty() {
        return Err(AppError::validation("clientIds must not be empty"));
    }

    let mut by_id: HashMap<String, Client> = clients.into_iter().map(|c| (c.id.clone(), c)).collect();
    let unknown: Vec<String> = grant
        .client_ids
        .iter()
        .filter(|id| !by_id.contains_key(id.as_str()))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::ClientNotFound,
            format!("{} client(s) not found", unknown.len()),
        )
        .with_detail("clientIds", unknown));
    }

    let mut seen = HashSet::new();
    let mut updated = Vec::new();
    for id in &grant.client_ids {
        if !seen.insert(id.as_str()) {
            continue;
        }
        let Some(mut c) = by_id.remove(id) else {
            continue;
        };
        c.points = c.points.checked_add(grant.points).ok_or_else(|| {
            AppError::with_message(ErrorCode::LoyaltyInvalidPoints, "points balance overflow")
                .with_detail("clientId", id.clone())
        })?;
        updated.push(c);
    }
    Ok(updated)
}

/// POST /api/clients/loyalty/grant - add points to several clients in one
/// batch write
pub async fn grant_loyalty(
    State(state): State<AppState>,
    Json(payload): Json<LoyaltyGrant>,
) -> AppResult<Json<Vec<Client>>> {
    let clients = client::find_all(state.store()).await?;
    let updated = plan_grant(clients, &payload)?;

    let points: HashMap<String, i64> = updated.iter().map(|c| (c.id.clone(), c.points)).collect();
    client::set_points(state.store(), &points).await?;

    tracing::info!(
        clients = updated.len(),
        points = payload.points,
        "Loyalty points granted"
    );
    Ok(Json(updated))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clients() -> Vec<Client> {
        ["a", "b"]
            .into_iter()
            .map(|id| Client {
                id: id.into(),
                points: 10,
                ..Default::default()
            })
            .collect()
    }

    fn grant(ids: &[&str], points: i64) -> LoyaltyGrant {
        LoyaltyGrant {
            client_ids: ids.iter().map(|s| s.to_string()).collect(),
            points,
        }
    }

    #[test]
    fn test_plan_grant_dedupes_ids() {
        let updated = plan_grant(clients(), &grant(&["b", "a", "b"], 5)).unwrap();
        let summary: Vec<_> = updated.iter().map(|c| (c.id.as_str(), c.points)).collect();
        assert_eq!(summary, [("b", 15), ("a", 15)]);
    }

    #[test]
    fn test_plan_grant_rejects() {
        let err = plan_grant(clients(), &grant(&["a", "zzz"], 5)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ClientNotFound);

        let err = plan_grant(clients(), &grant(&["a"], 0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::LoyaltyInvalidPoints);

        let err = plan_grant(clients(), &grant(&[], 5)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
