//! Demographic profile endpoints
//!
//! Collected at most once per visitor, offered as the fallback action when
//! everything has been judged.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use wisu_common::db::models::Profile;

use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct SaveProfileRequest {
    pub visitor_id: String,
    pub country: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub occupation: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveProfileResponse {
    pub saved: bool,
    /// False when the visitor had already submitted a profile
    pub created: bool,
}

/// GET /api/profiles/:visitor_id
pub async fn get_profile(
    State(state): State<AppState>,
    Path(visitor_id): Path<String>,
) -> ApiResult<Json<Profile>> {
    let profile = crate::db::profiles::load_profile(&state.db, &visitor_id)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to load profile: {e}")))?
        .ok_or_else(|| ApiError::NotFound(format!("Profile for visitor {visitor_id}")))?;
    Ok(Json(profile))
}

/// POST /api/profiles
///
/// Insert-once: a second submission is acknowledged but ignored.
pub async fn save_profile(
    State(state): State<AppState>,
    Json(payload): Json<SaveProfileRequest>,
) -> ApiResult<Json<SaveProfileResponse>> {
    if payload.visitor_id.trim().is_empty() {
        return Err(ApiError::BadRequest("Missing visitor id".to_string()));
    }
    if let Some(age) = payload.age {
        if !(10..=120).contains(&age) {
            return Err(ApiError::BadRequest("Age must be between 10 and 120".to_string()));
        }
    }

    let normalize = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

    let profile = Profile {
        visitor_id: payload.visitor_id.trim().to_string(),
        country: normalize(payload.country),
        age: payload.age,
        gender: normalize(payload.gender),
        occupation: normalize(payload.occupation),
        created_at: Utc::now(),
    };

    let created = crate::db::profiles::save_profile_once(&state.db, &profile)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to save profile: {e}")))?;

    Ok(Json(SaveProfileResponse { saved: true, created }))
}

/// Build profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/api/profiles", post(save_profile))
        .route("/api/profiles/:visitor_id", get(get_profile))
}
