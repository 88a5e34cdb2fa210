//! Pair selection endpoint
//!
//! The one stateful-looking operation in the service: given a visitor and
//! the cursor they carried from the previous call, recompute the eligible
//! questions from live vote data and return the pair to show next. The
//! cursor travels with the client; the server keeps no per-visitor
//! position.
//!
//! Storage failures degrade to "no available pairs" rather than erroring,
//! so the voting flow stays usable offline.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;
use wisu_common::db::models::{Idea, Provenance, Question};

use crate::engine::{self, EligibleQuestion, VoteCursor};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct NextPairRequest {
    pub visitor_id: String,
    /// Cursor from the previous response; absent on first call
    pub cursor: Option<VoteCursor>,
    /// Skip to the next pair without voting
    #[serde(default)]
    pub advance: bool,
    /// Explicit navigation to a chosen question
    pub change_question: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct IdeaView {
    pub id: Uuid,
    pub text: String,
    pub provenance: Provenance,
}

impl From<&Idea> for IdeaView {
    fn from(idea: &Idea) -> Self {
        Self {
            id: idea.id,
            text: idea.text.clone(),
            provenance: idea.provenance,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub id: Uuid,
    pub text: String,
    /// Position among the questions that still have pairs for this visitor
    pub index: usize,
    pub eligible_count: usize,
}

#[derive(Debug, Serialize)]
pub struct NextPairResponse {
    /// True when no question has an available pair for this visitor
    pub done: bool,
    /// Offered as a fallback action once everything is judged
    pub collect_profile: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<VoteCursor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idea_a: Option<IdeaView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idea_b: Option<IdeaView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair_count: Option<usize>,
}

/// One question with the pairs the visitor has not judged yet
pub struct QuestionAvailability {
    pub question: Question,
    pub pairs: Vec<(Idea, Idea)>,
}

/// Questions (newest first) that still have at least one available pair
/// for the visitor.
///
/// Any storage failure is logged and treated as "nothing available" for
/// the affected question — or for all of them when the question list
/// itself cannot be read.
pub async fn eligible_questions(
    state: &AppState,
    visitor_id: &str,
) -> Vec<QuestionAvailability> {
    let questions = match crate::db::questions::load_questions(&state.db).await {
        Ok(questions) => questions,
        Err(e) => {
            warn!("Failed to load questions, treating as none available: {e}");
            return Vec::new();
        }
    };

    let mut eligible = Vec::new();
    for question in questions {
        let pairs = available_pairs_for(state, visitor_id, question.id).await;
        if !pairs.is_empty() {
            eligible.push(QuestionAvailability { question, pairs });
        }
    }
    eligible
}

/// Unjudged pairs for one (visitor, question); empty on any storage failure
pub async fn available_pairs_for(
    state: &AppState,
    visitor_id: &str,
    question_id: Uuid,
) -> Vec<(Idea, Idea)> {
    let ideas = match crate::db::ideas::load_ideas_for_question(&state.db, question_id).await {
        Ok(ideas) => ideas,
        Err(e) => {
            warn!("Failed to load ideas for {question_id}: {e}");
            return Vec::new();
        }
    };

    let votes = match crate::db::votes::load_votes_for_visitor(&state.db, visitor_id, question_id)
        .await
    {
        Ok(votes) => votes,
        Err(e) => {
            warn!("Failed to load votes for {question_id}: {e}");
            return Vec::new();
        }
    };

    let judged = engine::judged_keys(&votes);
    engine::available_pairs(engine::generate_pairs(&ideas), &judged)
}

/// POST /api/pairs/next
///
/// Returns the pair the visitor should judge next, plus the updated
/// cursor to echo back on the following call.
pub async fn next_pair(
    State(state): State<AppState>,
    Json(payload): Json<NextPairRequest>,
) -> Json<NextPairResponse> {
    let eligible = eligible_questions(&state, &payload.visitor_id).await;
    let slots: Vec<EligibleQuestion> = eligible
        .iter()
        .map(|q| EligibleQuestion {
            question_id: q.question.id,
            pair_count: q.pairs.len(),
        })
        .collect();

    let mut cursor = payload.cursor.unwrap_or_else(VoteCursor::initial);

    let active = if let Some(question_id) = payload.change_question {
        cursor.change_question(question_id, &slots)
    } else if payload.advance {
        cursor.advance(&slots)
    } else {
        cursor.resolve(&slots)
    };

    if !active {
        return Json(all_judged_response(&state, &payload.visitor_id).await);
    }

    let current = &eligible[cursor.question_index];
    let (idea_a, idea_b) = &current.pairs[cursor.pair_index];

    Json(NextPairResponse {
        done: false,
        collect_profile: false,
        question: Some(QuestionView {
            id: current.question.id,
            text: current.question.text.clone(),
            index: cursor.question_index,
            eligible_count: eligible.len(),
        }),
        idea_a: Some(idea_a.into()),
        idea_b: Some(idea_b.into()),
        pair_index: Some(cursor.pair_index),
        pair_count: Some(current.pairs.len()),
        cursor: Some(cursor),
    })
}

async fn all_judged_response(state: &AppState, visitor_id: &str) -> NextPairResponse {
    // Offer the demographic form unless the visitor already filled it in
    let collect_profile = match crate::db::profiles::has_profile(&state.db, visitor_id).await {
        Ok(has) => !has,
        Err(e) => {
            warn!("Failed to check profile for {visitor_id}: {e}");
            false
        }
    };

    NextPairResponse {
        done: true,
        collect_profile,
        cursor: None,
        question: None,
        idea_a: None,
        idea_b: None,
        pair_index: None,
        pair_count: None,
    }
}

/// Build pair selection routes
pub fn pair_routes() -> Router<AppState> {
    Router::new().route("/api/pairs/next", post(next_pair))
}
