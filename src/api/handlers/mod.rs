use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::engine::get_city_resources;
use crate::models::*;

use super::AppState;

// ============================================================
// Error Handling
// ============================================================

/// Log an internal error and return a sanitized response to the client.
fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    tracing::error!("Internal error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Generation
// ============================================================

pub async fn generate_checklist(
    State(state): State<AppState>,
    Json(situation): Json<UserSituation>,
) -> Json<PersonalizedChecklist> {
    Json(state.generator.generate(&situation))
}

#[derive(Debug, Deserialize)]
pub struct CityQuery {
    pub city: Option<String>,
}

pub async fn find_city_resources(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> Result<Json<CityResource>, (StatusCode, String)> {
    get_city_resources(&state.generator.catalog().resources, query.city.as_deref())
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "No resources for city".to_string()))
}

// ============================================================
// Progress
// ============================================================

#[derive(Debug, Deserialize)]
pub struct IdentityQuery {
    pub email: Option<String>,
    pub user_id: Option<String>,
}

pub async fn get_progress(
    State(state): State<AppState>,
    Path(checklist_id): Path<String>,
    Query(identity): Query<IdentityQuery>,
) -> Result<Json<ChecklistProgress>, (StatusCode, String)> {
    let query = ProgressQuery {
        checklist_id,
        email: identity.email,
        user_id: identity.user_id,
    };
    state
        .db
        .find_progress(&query)
        .map_err(internal_error)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Progress not found".to_string()))
}

pub async fn upsert_progress(
    State(state): State<AppState>,
    Path(checklist_id): Path<String>,
    Json(input): Json<UpsertProgressInput>,
) -> Result<Json<ChecklistProgress>, (StatusCode, String)> {
    if input.email.is_none() && input.user_id.is_none() {
        return Err((
            StatusCode::BAD_REQUEST,
            "email or userId is required".to_string(),
        ));
    }

    state
        .db
        .upsert_progress(&checklist_id, input)
        .map(Json)
        .map_err(internal_error)
}
