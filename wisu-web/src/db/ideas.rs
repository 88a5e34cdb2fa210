//! Idea database operations
//!
//! Ideas are insert-only; sentiment columns are written once at creation.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;
use wisu_common::db::models::{Idea, Provenance};
use wisu_common::SentimentLabel;

/// Save an idea
pub async fn save_idea(pool: &SqlitePool, idea: &Idea) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO ideas (
            id, question_id, text, provenance, visitor_id,
            created_at, sentiment_score, sentiment_label
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(idea.id.to_string())
    .bind(idea.question_id.to_string())
    .bind(&idea.text)
    .bind(idea.provenance.as_str())
    .bind(&idea.visitor_id)
    .bind(idea.created_at)
    .bind(idea.sentiment_score)
    .bind(idea.sentiment_label.as_str())
    .execute(pool)
    .await?;

    Ok(())
}

/// Save an idea inside an open transaction
pub async fn save_idea_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    idea: &Idea,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO ideas (
            id, question_id, text, provenance, visitor_id,
            created_at, sentiment_score, sentiment_label
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(idea.id.to_string())
    .bind(idea.question_id.to_string())
    .bind(&idea.text)
    .bind(idea.provenance.as_str())
    .bind(&idea.visitor_id)
    .bind(idea.created_at)
    .bind(idea.sentiment_score)
    .bind(idea.sentiment_label.as_str())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Load all ideas for a question, oldest first.
///
/// The ordering is only used to canonicalize pair identity; it carries no
/// selection bias.
pub async fn load_ideas_for_question(pool: &SqlitePool, question_id: Uuid) -> Result<Vec<Idea>> {
    let rows = sqlx::query(
        r#"
        SELECT id, question_id, text, provenance, visitor_id,
               created_at, sentiment_score, sentiment_label
        FROM ideas
        WHERE question_id = ?
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(question_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter().map(idea_from_row).collect()
}

/// Load one idea by id
pub async fn load_idea(pool: &SqlitePool, id: Uuid) -> Result<Option<Idea>> {
    let row = sqlx::query(
        r#"
        SELECT id, question_id, text, provenance, visitor_id,
               created_at, sentiment_score, sentiment_label
        FROM ideas
        WHERE id = ?
        "#,
    )
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(idea_from_row).transpose()
}

fn idea_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Idea> {
    let id_str: String = row.get("id");
    let question_id_str: String = row.get("question_id");
    let provenance_str: String = row.get("provenance");
    let label_str: String = row.get("sentiment_label");

    Ok(Idea {
        id: Uuid::parse_str(&id_str).map_err(|e| anyhow!("bad idea id: {e}"))?,
        question_id: Uuid::parse_str(&question_id_str)
            .map_err(|e| anyhow!("bad question id: {e}"))?,
        text: row.get("text"),
        provenance: Provenance::parse(&provenance_str)
            .ok_or_else(|| anyhow!("bad provenance: {provenance_str}"))?,
        visitor_id: row.get("visitor_id"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
        sentiment_score: row.get("sentiment_score"),
        sentiment_label: SentimentLabel::parse(&label_str)
            .ok_or_else(|| anyhow!("bad sentiment label: {label_str}"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wisu_common::db::models::Question;
    use wisu_common::Sentiment;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        wisu_common::db::init_schema(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_save_and_load_ideas() {
        let pool = test_pool().await;

        let question = Question::new("Q?".to_string(), "admin".to_string());
        crate::db::questions::save_question(&pool, &question)
            .await
            .unwrap();

        let original = Idea::new(
            question.id,
            "Free education".to_string(),
            Provenance::Original,
            None,
            Sentiment::from_score(0.5),
        );
        let contributed = Idea::new(
            question.id,
            "Single currency".to_string(),
            Provenance::Contributed,
            Some("visitor-1".to_string()),
            Sentiment::neutral(),
        );
        save_idea(&pool, &original).await.unwrap();
        save_idea(&pool, &contributed).await.unwrap();

        let loaded = load_ideas_for_question(&pool, question.id).await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].provenance, Provenance::Original);
        assert_eq!(loaded[1].provenance, Provenance::Contributed);
        assert_eq!(loaded[1].visitor_id.as_deref(), Some("visitor-1"));
        assert_eq!(loaded[0].sentiment_score, 0.5);
    }
}
