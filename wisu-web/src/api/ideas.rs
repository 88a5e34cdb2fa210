//! Idea endpoints
//!
//! Participants contribute new ideas to existing questions; each idea is
//! sentiment-annotated at creation and the analytics cache refreshed.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;
use wisu_common::db::models::{Idea, Provenance};

use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct ContributeIdeaRequest {
    pub visitor_id: String,
    pub text: String,
}

/// GET /api/questions/:id/ideas
pub async fn list_ideas(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
) -> Json<Vec<Idea>> {
    let ideas = crate::db::ideas::load_ideas_for_question(&state.db, question_id)
        .await
        .unwrap_or_else(|e| {
            warn!("Failed to load ideas for {question_id}, returning empty list: {e}");
            Vec::new()
        });
    Json(ideas)
}

/// POST /api/questions/:id/ideas
///
/// Adds a contributed idea to an existing question.
pub async fn contribute_idea(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
    Json(payload): Json<ContributeIdeaRequest>,
) -> ApiResult<Json<Idea>> {
    let text = payload.text.trim();
    if text.is_empty() {
        return Err(ApiError::BadRequest("Idea text cannot be empty".to_string()));
    }
    if payload.visitor_id.trim().is_empty() {
        return Err(ApiError::BadRequest("Missing visitor id".to_string()));
    }

    let question = crate::db::questions::load_question(&state.db, question_id)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to load question: {e}")))?;
    if question.is_none() {
        return Err(ApiError::NotFound(format!("Question {question_id}")));
    }

    let idea = Idea::new(
        question_id,
        text.to_string(),
        Provenance::Contributed,
        Some(payload.visitor_id.trim().to_string()),
        state.sentiment.analyze(text),
    );
    crate::db::ideas::save_idea(&state.db, &idea)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to save idea: {e}")))?;

    info!("Contributed idea {} to question {}", idea.id, question_id);

    if let Err(e) = crate::db::analytics::refresh_sentiment_analytics(&state.db, question_id).await
    {
        warn!("Analytics refresh failed for question {question_id}: {e}");
    }

    Ok(Json(idea))
}

/// Build idea routes
pub fn idea_routes() -> Router<AppState> {
    Router::new().route(
        "/api/questions/:id/ideas",
        get(list_ideas).post(contribute_idea),
    )
}
