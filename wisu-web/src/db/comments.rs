//! Comment database operations

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;
use wisu_common::db::models::Comment;
use wisu_common::SentimentLabel;

/// Save a comment
pub async fn save_comment(pool: &SqlitePool, comment: &Comment) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO comments (
            id, question_id, visitor_id, text, created_at, sentiment_score, sentiment_label
        ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(comment.id.to_string())
    .bind(comment.question_id.to_string())
    .bind(&comment.visitor_id)
    .bind(&comment.text)
    .bind(comment.created_at)
    .bind(comment.sentiment_score)
    .bind(comment.sentiment_label.as_str())
    .execute(pool)
    .await?;

    Ok(())
}

/// Load all comments for a question, oldest first
pub async fn load_comments_for_question(
    pool: &SqlitePool,
    question_id: Uuid,
) -> Result<Vec<Comment>> {
    let rows = sqlx::query(
        r#"
        SELECT id, question_id, visitor_id, text, created_at, sentiment_score, sentiment_label
        FROM comments
        WHERE question_id = ?
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(question_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter().map(comment_from_row).collect()
}

fn comment_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Comment> {
    let id_str: String = row.get("id");
    let question_id_str: String = row.get("question_id");
    let label_str: String = row.get("sentiment_label");

    Ok(Comment {
        id: Uuid::parse_str(&id_str).map_err(|e| anyhow!("bad comment id: {e}"))?,
        question_id: Uuid::parse_str(&question_id_str)
            .map_err(|e| anyhow!("bad question id: {e}"))?,
        visitor_id: row.get("visitor_id"),
        text: row.get("text"),
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

    #[tokio::test]
    async fn test_save_and_load_comments() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        wisu_common::db::init_schema(&pool).await.unwrap();

        let question = Question::new("Q?".to_string(), "admin".to_string());
        crate::db::questions::save_question(&pool, &question)
            .await
            .unwrap();

        let comment = Comment::new(
            question.id,
            "visitor-1".to_string(),
            "Great question".to_string(),
            Sentiment::from_score(0.8),
        );
        save_comment(&pool, &comment).await.unwrap();

        let loaded = load_comments_for_question(&pool, question.id).await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].text, "Great question");
        assert_eq!(loaded[0].sentiment_label, wisu_common::SentimentLabel::Positive);
    }
}
