//! Vote ledger operations
//!
//! Append-only: votes are inserted and queried, never updated or deleted.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;
use wisu_common::db::models::Vote;

/// Append a vote to the ledger
pub async fn save_vote(pool: &SqlitePool, vote: &Vote) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO votes (id, visitor_id, question_id, winner_idea_id, loser_idea_id, voted_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(vote.id.to_string())
    .bind(&vote.visitor_id)
    .bind(vote.question_id.to_string())
    .bind(vote.winner_idea_id.to_string())
    .bind(vote.loser_idea_id.to_string())
    .bind(vote.voted_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load one visitor's votes for a question (their judged-pair history)
pub async fn load_votes_for_visitor(
    pool: &SqlitePool,
    visitor_id: &str,
    question_id: Uuid,
) -> Result<Vec<Vote>> {
    let rows = sqlx::query(
        r#"
        SELECT id, visitor_id, question_id, winner_idea_id, loser_idea_id, voted_at
        FROM votes
        WHERE visitor_id = ? AND question_id = ?
        ORDER BY voted_at ASC, id ASC
        "#,
    )
    .bind(visitor_id)
    .bind(question_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter().map(vote_from_row).collect()
}

/// Load the full ledger for a question (all visitors), oldest first
pub async fn load_votes_for_question(pool: &SqlitePool, question_id: Uuid) -> Result<Vec<Vote>> {
    let rows = sqlx::query(
        r#"
        SELECT id, visitor_id, question_id, winner_idea_id, loser_idea_id, voted_at
        FROM votes
        WHERE question_id = ?
        ORDER BY voted_at ASC, id ASC
        "#,
    )
    .bind(question_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter().map(vote_from_row).collect()
}

fn vote_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Vote> {
    let id_str: String = row.get("id");
    let question_id_str: String = row.get("question_id");
    let winner_str: String = row.get("winner_idea_id");
    let loser_str: String = row.get("loser_idea_id");

    Ok(Vote {
        id: Uuid::parse_str(&id_str).map_err(|e| anyhow!("bad vote id: {e}"))?,
        visitor_id: row.get("visitor_id"),
        question_id: Uuid::parse_str(&question_id_str)
            .map_err(|e| anyhow!("bad question id: {e}"))?,
        winner_idea_id: Uuid::parse_str(&winner_str)
            .map_err(|e| anyhow!("bad winner id: {e}"))?,
        loser_idea_id: Uuid::parse_str(&loser_str).map_err(|e| anyhow!("bad loser id: {e}"))?,
        voted_at: row.get::<DateTime<Utc>, _>("voted_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wisu_common::db::models::{Idea, Provenance, Question};
    use wisu_common::Sentiment;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        wisu_common::db::init_schema(&pool).await.unwrap();
        pool
    }

    async fn seed_question_with_ideas(pool: &SqlitePool, n: usize) -> (Question, Vec<Idea>) {
        let question = Question::new("Q?".to_string(), "admin".to_string());
        crate::db::questions::save_question(pool, &question)
            .await
            .unwrap();
        let mut ideas = Vec::new();
        for i in 0..n {
            let idea = Idea::new(
                question.id,
                format!("idea {i}"),
                Provenance::Original,
                None,
                Sentiment::neutral(),
            );
            crate::db::ideas::save_idea(pool, &idea).await.unwrap();
            ideas.push(idea);
        }
        (question, ideas)
    }

    #[tokio::test]
    async fn test_save_and_load_votes() {
        let pool = test_pool().await;
        let (question, ideas) = seed_question_with_ideas(&pool, 2).await;

        let vote = Vote::new(
            "visitor-1".to_string(),
            question.id,
            ideas[0].id,
            ideas[1].id,
        );
        save_vote(&pool, &vote).await.expect("Failed to save vote");

        let mine = load_votes_for_visitor(&pool, "visitor-1", question.id)
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].winner_idea_id, ideas[0].id);

        let others = load_votes_for_visitor(&pool, "visitor-2", question.id)
            .await
            .unwrap();
        assert!(others.is_empty());

        let all = load_votes_for_question(&pool, question.id).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_votes_are_accepted() {
        // No uniqueness constraint on (visitor, question, pair): a replayed
        // stale pair inserts a second row.
        let pool = test_pool().await;
        let (question, ideas) = seed_question_with_ideas(&pool, 2).await;

        let first = Vote::new("v".to_string(), question.id, ideas[0].id, ideas[1].id);
        let replay = Vote::new("v".to_string(), question.id, ideas[1].id, ideas[0].id);
        save_vote(&pool, &first).await.unwrap();
        save_vote(&pool, &replay).await.unwrap();

        let all = load_votes_for_question(&pool, question.id).await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
