//! Question endpoints
//!
//! A question is created together with its two required seed ideas; the
//! three inserts share one transaction so a validation or storage failure
//! leaves no partial write behind.

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use wisu_common::db::models::{Idea, Provenance, Question};

use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct CreateQuestionRequest {
    pub text: String,
    /// Opaque creator reference (email, account id, whatever the front-end has)
    pub creator_ref: String,
    pub idea1: String,
    pub idea2: String,
}

#[derive(Debug, Serialize)]
pub struct CreateQuestionResponse {
    pub question: Question,
    pub ideas: Vec<Idea>,
}

/// GET /api/questions
///
/// All questions, newest first.
pub async fn list_questions(State(state): State<AppState>) -> Json<Vec<Question>> {
    let questions = crate::db::questions::load_questions(&state.db)
        .await
        .unwrap_or_else(|e| {
            warn!("Failed to load questions, returning empty list: {e}");
            Vec::new()
        });
    Json(questions)
}

/// POST /api/questions
///
/// Creates a question plus its two original ideas, sentiment-annotated.
pub async fn create_question(
    State(state): State<AppState>,
    Json(payload): Json<CreateQuestionRequest>,
) -> ApiResult<Json<CreateQuestionResponse>> {
    let text = payload.text.trim();
    let idea1 = payload.idea1.trim();
    let idea2 = payload.idea2.trim();

    if text.is_empty() {
        return Err(ApiError::BadRequest("Question text cannot be empty".to_string()));
    }
    if idea1.is_empty() || idea2.is_empty() {
        return Err(ApiError::BadRequest(
            "A question needs two non-empty ideas".to_string(),
        ));
    }

    let question = Question::new(text.to_string(), payload.creator_ref.trim().to_string());
    let ideas = vec![
        Idea::new(
            question.id,
            idea1.to_string(),
            Provenance::Original,
            None,
            state.sentiment.analyze(idea1),
        ),
        Idea::new(
            question.id,
            idea2.to_string(),
            Provenance::Original,
            None,
            state.sentiment.analyze(idea2),
        ),
    ];

    let mut tx = state
        .db
        .begin()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to open transaction: {e}")))?;
    crate::db::questions::save_question_tx(&mut tx, &question)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to save question: {e}")))?;
    for idea in &ideas {
        crate::db::ideas::save_idea_tx(&mut tx, idea)
            .await
            .map_err(|e| ApiError::Internal(format!("Failed to save idea: {e}")))?;
    }
    tx.commit()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to commit question: {e}")))?;

    info!("Created question {} with 2 ideas", question.id);

    // Cache refresh failure never unwinds the committed write
    if let Err(e) = crate::db::analytics::refresh_sentiment_analytics(&state.db, question.id).await
    {
        warn!("Analytics refresh failed for question {}: {e}", question.id);
    }

    Ok(Json(CreateQuestionResponse { question, ideas }))
}

/// Build question routes
pub fn question_routes() -> Router<AppState> {
    Router::new().route("/api/questions", get(list_questions).post(create_question))
}
