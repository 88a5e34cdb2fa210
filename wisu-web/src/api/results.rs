//! Ranking results endpoint

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::engine::{self, IdeaRank};
use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub question_id: Uuid,
    pub question_text: String,
    pub rankings: Vec<IdeaRank>,
    pub total_votes: usize,
}

/// GET /api/questions/:id/results
///
/// Win/loss ranking over the full vote ledger for the question. Tie votes
/// were stored as directional wins, so tallies include them.
pub async fn question_results(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
) -> ApiResult<Json<ResultsResponse>> {
    let question = crate::db::questions::load_question(&state.db, question_id)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to load question: {e}")))?
        .ok_or_else(|| ApiError::NotFound(format!("Question {question_id}")))?;

    // Degraded mode: a failed ledger or idea read ranks as "no data"
    let ideas = crate::db::ideas::load_ideas_for_question(&state.db, question_id)
        .await
        .unwrap_or_else(|e| {
            warn!("Failed to load ideas for results of {question_id}: {e}");
            Vec::new()
        });
    let votes = crate::db::votes::load_votes_for_question(&state.db, question_id)
        .await
        .unwrap_or_else(|e| {
            warn!("Failed to load votes for results of {question_id}: {e}");
            Vec::new()
        });

    let rankings = engine::rank_ideas(&ideas, &votes);

    Ok(Json(ResultsResponse {
        question_id,
        question_text: question.text,
        rankings,
        total_votes: votes.len(),
    }))
}

/// Build results routes
pub fn result_routes() -> Router<AppState> {
    Router::new().route("/api/questions/:id/results", get(question_results))
}
