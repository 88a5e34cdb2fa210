//! Visitor registration endpoint
//!
//! Visitors normally arrive with a client-persisted id; when they don't,
//! the server mints a fresh v4 id and the client is expected to persist it.

use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use wisu_common::db::models::Visitor;

use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct RegisterVisitorRequest {
    /// Client-persisted id; omitted on first ever contact
    pub visitor_id: Option<String>,
    /// Browser family reported by the client
    pub browser: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterVisitorResponse {
    pub visitor_id: String,
}

/// POST /api/visitors
///
/// Registers (or re-registers) an anonymous visitor, minting an id when
/// the client has none.
pub async fn register_visitor(
    State(state): State<AppState>,
    Json(payload): Json<RegisterVisitorRequest>,
) -> ApiResult<Json<RegisterVisitorResponse>> {
    let visitor_id = match payload.visitor_id {
        Some(id) if !id.trim().is_empty() => {
            let id = id.trim().to_string();
            if id.len() > 100 {
                return Err(ApiError::BadRequest("Visitor id too long".to_string()));
            }
            id
        }
        _ => Uuid::new_v4().to_string(),
    };

    let visitor = Visitor {
        visitor_id: visitor_id.clone(),
        browser: payload.browser,
        created_at: Utc::now(),
    };
    crate::db::visitors::upsert_visitor(&state.db, &visitor)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to register visitor: {e}")))?;

    info!("Registered visitor {}", visitor_id);
    Ok(Json(RegisterVisitorResponse { visitor_id }))
}

/// Build visitor routes
pub fn visitor_routes() -> Router<AppState> {
    Router::new().route("/api/visitors", post(register_visitor))
}
