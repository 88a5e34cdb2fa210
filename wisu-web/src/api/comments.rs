//! Comment endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;
use wisu_common::db::models::Comment;

use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub visitor_id: String,
    pub text: String,
}

/// GET /api/questions/:id/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
) -> Json<Vec<Comment>> {
    let comments = crate::db::comments::load_comments_for_question(&state.db, question_id)
        .await
        .unwrap_or_else(|e| {
            warn!("Failed to load comments for {question_id}, returning empty list: {e}");
            Vec::new()
        });
    Json(comments)
}

/// POST /api/questions/:id/comments
///
/// Adds a sentiment-annotated comment and refreshes the analytics cache.
pub async fn create_comment(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
    Json(payload): Json<CreateCommentRequest>,
) -> ApiResult<Json<Comment>> {
    let text = payload.text.trim();
    if text.is_empty() {
        return Err(ApiError::BadRequest("Comment text cannot be empty".to_string()));
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

    let comment = Comment::new(
        question_id,
        payload.visitor_id.trim().to_string(),
        text.to_string(),
        state.sentiment.analyze(text),
    );
    crate::db::comments::save_comment(&state.db, &comment)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to save comment: {e}")))?;

    if let Err(e) = crate::db::analytics::refresh_sentiment_analytics(&state.db, question_id).await
    {
        warn!("Analytics refresh failed for question {question_id}: {e}");
    }

    Ok(Json(comment))
}

/// Build comment routes
pub fn comment_routes() -> Router<AppState> {
    Router::new().route(
        "/api/questions/:id/comments",
        get(list_comments).post(create_comment),
    )
}
