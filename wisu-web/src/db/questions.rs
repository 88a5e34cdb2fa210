//! Question database operations

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;
use wisu_common::db::models::Question;

/// Save a question
pub async fn save_question(pool: &SqlitePool, question: &Question) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO questions (id, text, creator_ref, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(question.id.to_string())
    .bind(&question.text)
    .bind(&question.creator_ref)
    .bind(question.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Save a question inside an open transaction
pub async fn save_question_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    question: &Question,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO questions (id, text, creator_ref, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(question.id.to_string())
    .bind(&question.text)
    .bind(&question.creator_ref)
    .bind(question.created_at)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Load all questions, newest first
pub async fn load_questions(pool: &SqlitePool) -> Result<Vec<Question>> {
    let rows = sqlx::query(
        r#"
        SELECT id, text, creator_ref, created_at
        FROM questions
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(question_from_row).collect()
}

/// Load one question by id
pub async fn load_question(pool: &SqlitePool, id: Uuid) -> Result<Option<Question>> {
    let row = sqlx::query(
        r#"
        SELECT id, text, creator_ref, created_at
        FROM questions
        WHERE id = ?
        "#,
    )
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(question_from_row).transpose()
}

fn question_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Question> {
    let id_str: String = row.get("id");
    Ok(Question {
        id: Uuid::parse_str(&id_str).map_err(|e| anyhow!("bad question id: {e}"))?,
        text: row.get("text"),
        creator_ref: row.get("creator_ref"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        wisu_common::db::init_schema(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_save_and_load_question() {
        let pool = test_pool().await;

        let question = Question::new("What matters most?".to_string(), "admin".to_string());
        save_question(&pool, &question).await.expect("Failed to save");

        let loaded = load_question(&pool, question.id)
            .await
            .expect("Failed to load")
            .expect("Question not found");
        assert_eq!(loaded.text, "What matters most?");
        assert_eq!(loaded.creator_ref, "admin");
    }

    #[tokio::test]
    async fn test_questions_listed_newest_first() {
        let pool = test_pool().await;

        let mut older = Question::new("older".to_string(), "admin".to_string());
        older.created_at = older.created_at - chrono::Duration::hours(1);
        let newer = Question::new("newer".to_string(), "admin".to_string());

        save_question(&pool, &older).await.unwrap();
        save_question(&pool, &newer).await.unwrap();

        let all = load_questions(&pool).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].text, "newer");
        assert_eq!(all[1].text, "older");
    }
}
