//! Sentiment analytics endpoint

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;
use wisu_common::db::models::SentimentAnalytics;

use crate::{ApiError, ApiResult, AppState};

/// GET /api/questions/:id/analytics
///
/// Cached sentiment stats for the question; rebuilt on demand when the
/// cache row is missing (it is derived data, always reconstructible).
pub async fn question_analytics(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
) -> ApiResult<Json<SentimentAnalytics>> {
    let question = crate::db::questions::load_question(&state.db, question_id)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to load question: {e}")))?;
    if question.is_none() {
        return Err(ApiError::NotFound(format!("Question {question_id}")));
    }

    if let Some(stats) = crate::db::analytics::load_sentiment_analytics(&state.db, question_id)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to load analytics: {e}")))?
    {
        return Ok(Json(stats));
    }

    crate::db::analytics::refresh_sentiment_analytics(&state.db, question_id)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to rebuild analytics: {e}")))?;

    let stats = crate::db::analytics::load_sentiment_analytics(&state.db, question_id)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to load analytics: {e}")))?
        .ok_or_else(|| ApiError::Internal("Analytics row missing after rebuild".to_string()))?;

    Ok(Json(stats))
}

/// Build analytics routes
pub fn analytics_routes() -> Router<AppState> {
    Router::new().route("/api/questions/:id/analytics", get(question_analytics))
}
