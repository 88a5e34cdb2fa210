//! wisu-web library - Wiki Survey HTTP service
//!
//! Exposes the router and application state for integration testing.

pub mod api;
pub mod db;
pub mod engine;
pub mod error;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use wisu_common::sentiment::{LexiconAnalyzer, SentimentAnalyzer};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Injected sentiment collaborator
    pub sentiment: Arc<dyn SentimentAnalyzer>,
}

impl AppState {
    /// State with the shipped lexicon analyzer
    pub fn new(db: SqlitePool) -> Self {
        Self::with_analyzer(db, Arc::new(LexiconAnalyzer))
    }

    /// State with a caller-supplied sentiment analyzer
    pub fn with_analyzer(db: SqlitePool, sentiment: Arc<dyn SentimentAnalyzer>) -> Self {
        Self { db, sentiment }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // UI routes (HTML pages)
        .merge(api::ui_routes())
        // API routes
        .merge(api::health_routes())
        .merge(api::visitor_routes())
        .merge(api::question_routes())
        .merge(api::idea_routes())
        .merge(api::pair_routes())
        .merge(api::vote_routes())
        .merge(api::result_routes())
        .merge(api::analytics_routes())
        .merge(api::comment_routes())
        .merge(api::profile_routes())
        .merge(api::stats_routes())
        .with_state(state)
        // CORS for local access
        .layer(CorsLayer::permissive())
}
