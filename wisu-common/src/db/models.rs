//! Typed database records
//!
//! Every collection is read and written through these explicit records;
//! validation happens at the store boundary, never on loose JSON documents.

use crate::sentiment::{Sentiment, SentimentLabel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether an idea was supplied at question creation or added later
/// by a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Supplied by the creator when the question was created
    Original,
    /// Added later by an anonymous participant
    Contributed,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Original => "original",
            Provenance::Contributed => "contributed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "original" => Some(Provenance::Original),
            "contributed" => Some(Provenance::Contributed),
            _ => None,
        }
    }
}

/// An open-ended survey question. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub text: String,
    /// Opaque reference to the creator (no account storage here)
    pub creator_ref: String,
    pub created_at: DateTime<Utc>,
}

impl Question {
    pub fn new(text: String, creator_ref: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            creator_ref,
            created_at: Utc::now(),
        }
    }
}

/// A textual proposal attached to a question.
///
/// Sentiment fields are set once at creation and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Idea {
    pub id: Uuid,
    pub question_id: Uuid,
    pub text: String,
    pub provenance: Provenance,
    /// Set for contributed ideas, absent for original ones
    pub visitor_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
}

impl Idea {
    pub fn new(
        question_id: Uuid,
        text: String,
        provenance: Provenance,
        visitor_id: Option<String>,
        sentiment: Sentiment,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            question_id,
            text,
            provenance,
            visitor_id,
            created_at: Utc::now(),
            sentiment_score: sentiment.score,
            sentiment_label: sentiment.label,
        }
    }
}

/// One preference vote between two ideas. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub id: Uuid,
    pub visitor_id: String,
    pub question_id: Uuid,
    pub winner_idea_id: Uuid,
    pub loser_idea_id: Uuid,
    pub voted_at: DateTime<Utc>,
}

impl Vote {
    pub fn new(
        visitor_id: String,
        question_id: Uuid,
        winner_idea_id: Uuid,
        loser_idea_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            visitor_id,
            question_id,
            winner_idea_id,
            loser_idea_id,
            voted_at: Utc::now(),
        }
    }
}

/// A free-text comment on a question, sentiment-annotated like ideas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub question_id: Uuid,
    pub visitor_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
}

impl Comment {
    pub fn new(question_id: Uuid, visitor_id: String, text: String, sentiment: Sentiment) -> Self {
        Self {
            id: Uuid::new_v4(),
            question_id,
            visitor_id,
            text,
            created_at: Utc::now(),
            sentiment_score: sentiment.score,
            sentiment_label: sentiment.label,
        }
    }
}

/// An anonymous participant, identified by a client-persisted id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visitor {
    pub visitor_id: String,
    /// Browser family reported by the client, if any
    pub browser: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Optional demographic profile, at most one per visitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub visitor_id: String,
    pub country: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub occupation: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Denormalized per-question sentiment analytics.
///
/// This is a cache: fully recomputed on every idea/comment/vote write and
/// safe to drop and rebuild from the ideas and comments tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentAnalytics {
    pub question_id: Uuid,
    pub mean_idea_sentiment: f64,
    pub mean_comment_sentiment: f64,
    pub idea_positive: i64,
    pub idea_negative: i64,
    pub idea_neutral: i64,
    pub comment_positive: i64,
    pub comment_negative: i64,
    pub comment_neutral: i64,
    pub updated_at: DateTime<Utc>,
}
