//! Vote recording endpoint
//!
//! A "both equal" (tie) action arrives as a normal vote with the displayed
//! pair in its fixed (idea_a, idea_b) order; it counts as a win for
//! idea_a in the tallies. Kept for compatibility with the recorded data.
//!
//! Nothing here rejects a replayed stale pair: the judged-pair filter in
//! the selector is the only duplicate safeguard.

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;
use wisu_common::db::models::Vote;

use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct RecordVoteRequest {
    pub visitor_id: String,
    pub question_id: Uuid,
    pub winner_idea_id: Uuid,
    pub loser_idea_id: Uuid,
}

/// POST /api/votes
///
/// Validates and appends one vote, then refreshes the question's
/// analytics cache. The vote is durable even when the refresh fails.
pub async fn record_vote(
    State(state): State<AppState>,
    Json(payload): Json<RecordVoteRequest>,
) -> ApiResult<Json<Vote>> {
    if payload.visitor_id.trim().is_empty() {
        return Err(ApiError::BadRequest("Missing visitor id".to_string()));
    }
    if payload.winner_idea_id == payload.loser_idea_id {
        return Err(ApiError::BadRequest(
            "Winner and loser must be different ideas".to_string(),
        ));
    }

    // Both ideas must exist and belong to the stated question
    for idea_id in [payload.winner_idea_id, payload.loser_idea_id] {
        let idea = crate::db::ideas::load_idea(&state.db, idea_id)
            .await
            .map_err(|e| ApiError::Internal(format!("Failed to load idea: {e}")))?
            .ok_or_else(|| ApiError::NotFound(format!("Idea {idea_id}")))?;
        if idea.question_id != payload.question_id {
            return Err(ApiError::BadRequest(format!(
                "Idea {idea_id} does not belong to question {}",
                payload.question_id
            )));
        }
    }

    let vote = Vote::new(
        payload.visitor_id.trim().to_string(),
        payload.question_id,
        payload.winner_idea_id,
        payload.loser_idea_id,
    );
    crate::db::votes::save_vote(&state.db, &vote)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to record vote: {e}")))?;

    info!(
        "Vote {} recorded: {} beats {} on question {}",
        vote.id, vote.winner_idea_id, vote.loser_idea_id, vote.question_id
    );

    if let Err(e) =
        crate::db::analytics::refresh_sentiment_analytics(&state.db, payload.question_id).await
    {
        warn!(
            "Analytics refresh failed for question {} (vote kept): {e}",
            payload.question_id
        );
    }

    Ok(Json(vote))
}

/// Build vote routes
pub fn vote_routes() -> Router<AppState> {
    Router::new().route("/api/votes", post(record_vote))
}
