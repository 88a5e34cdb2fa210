//! Dashboard counts endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

/// Overview counts for the dashboard header
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub questions: i64,
    pub ideas: i64,
    pub votes: i64,
    pub visitors: i64,
}

/// GET /api/stats
///
/// Counts degrade to zero on storage failure rather than erroring.
pub async fn overview_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        questions: count_rows(&state, "questions").await,
        ideas: count_rows(&state, "ideas").await,
        votes: count_rows(&state, "votes").await,
        visitors: count_rows(&state, "visitors").await,
    })
}

async fn count_rows(state: &AppState, table: &'static str) -> i64 {
    // table is a compile-time literal, never user input
    match sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(&state.db)
        .await
    {
        Ok(count) => count,
        Err(e) => {
            warn!("Failed to count {table}: {e}");
            0
        }
    }
}

/// Build stats routes
pub fn stats_routes() -> Router<AppState> {
    Router::new().route("/api/stats", get(overview_stats))
}
