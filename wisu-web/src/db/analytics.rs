//! Sentiment analytics cache
//!
//! Denormalized per-question sentiment stats, fully recomputed from the
//! ideas and comments tables on every write. Not a source of truth: the
//! row can always be dropped and rebuilt.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;
use wisu_common::db::models::SentimentAnalytics;

/// Recompute and upsert the analytics row for a question.
///
/// Full recomputation via SQL aggregates, not incremental counters.
pub async fn refresh_sentiment_analytics(pool: &SqlitePool, question_id: Uuid) -> Result<()> {
    let idea_stats = aggregate_table(pool, "ideas", question_id).await?;
    let comment_stats = aggregate_table(pool, "comments", question_id).await?;

    sqlx::query(
        r#"
        INSERT INTO sentiment_analytics (
            question_id,
            mean_idea_sentiment, mean_comment_sentiment,
            idea_positive, idea_negative, idea_neutral,
            comment_positive, comment_negative, comment_neutral,
            updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(question_id) DO UPDATE SET
            mean_idea_sentiment = excluded.mean_idea_sentiment,
            mean_comment_sentiment = excluded.mean_comment_sentiment,
            idea_positive = excluded.idea_positive,
            idea_negative = excluded.idea_negative,
            idea_neutral = excluded.idea_neutral,
            comment_positive = excluded.comment_positive,
            comment_negative = excluded.comment_negative,
            comment_neutral = excluded.comment_neutral,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(question_id.to_string())
    .bind(idea_stats.mean)
    .bind(comment_stats.mean)
    .bind(idea_stats.positive)
    .bind(idea_stats.negative)
    .bind(idea_stats.neutral)
    .bind(comment_stats.positive)
    .bind(comment_stats.negative)
    .bind(comment_stats.neutral)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(())
}

struct TableStats {
    mean: f64,
    positive: i64,
    negative: i64,
    neutral: i64,
}

async fn aggregate_table(
    pool: &SqlitePool,
    table: &'static str,
    question_id: Uuid,
) -> Result<TableStats> {
    // table is one of two compile-time literals, never user input
    let sql = format!(
        r#"
        SELECT
            COALESCE(AVG(sentiment_score), 0.0) AS mean_score,
            COALESCE(SUM(CASE WHEN sentiment_label = 'Positive' THEN 1 ELSE 0 END), 0) AS positive,
            COALESCE(SUM(CASE WHEN sentiment_label = 'Negative' THEN 1 ELSE 0 END), 0) AS negative,
            COALESCE(SUM(CASE WHEN sentiment_label = 'Neutral' THEN 1 ELSE 0 END), 0) AS neutral
        FROM {table}
        WHERE question_id = ?
        "#
    );

    let row = sqlx::query(&sql)
        .bind(question_id.to_string())
        .fetch_one(pool)
        .await?;

    Ok(TableStats {
        mean: row.get("mean_score"),
        positive: row.get("positive"),
        negative: row.get("negative"),
        neutral: row.get("neutral"),
    })
}

/// Load the cached analytics row for a question
pub async fn load_sentiment_analytics(
    pool: &SqlitePool,
    question_id: Uuid,
) -> Result<Option<SentimentAnalytics>> {
    let row = sqlx::query(
        r#"
        SELECT question_id, mean_idea_sentiment, mean_comment_sentiment,
               idea_positive, idea_negative, idea_neutral,
               comment_positive, comment_negative, comment_neutral,
               updated_at
        FROM sentiment_analytics
        WHERE question_id = ?
        "#,
    )
    .bind(question_id.to_string())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| SentimentAnalytics {
        question_id,
        mean_idea_sentiment: row.get("mean_idea_sentiment"),
        mean_comment_sentiment: row.get("mean_comment_sentiment"),
        idea_positive: row.get("idea_positive"),
        idea_negative: row.get("idea_negative"),
        idea_neutral: row.get("idea_neutral"),
        comment_positive: row.get("comment_positive"),
        comment_negative: row.get("comment_negative"),
        comment_neutral: row.get("comment_neutral"),
        updated_at: row.get::<DateTime<Utc>, _>("updated_at"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wisu_common::db::models::{Comment, Idea, Provenance, Question};
    use wisu_common::Sentiment;

    #[tokio::test]
    async fn test_refresh_counts_labels_and_means() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        wisu_common::db::init_schema(&pool).await.unwrap();

        let question = Question::new("Q?".to_string(), "admin".to_string());
        crate::db::questions::save_question(&pool, &question)
            .await
            .unwrap();

        for (text, score) in [("good idea", 0.6), ("bad idea", -0.6), ("plain idea", 0.0)] {
            let idea = Idea::new(
                question.id,
                text.to_string(),
                Provenance::Original,
                None,
                Sentiment::from_score(score),
            );
            crate::db::ideas::save_idea(&pool, &idea).await.unwrap();
        }
        let comment = Comment::new(
            question.id,
            "visitor-1".to_string(),
            "love it".to_string(),
            Sentiment::from_score(0.9),
        );
        crate::db::comments::save_comment(&pool, &comment)
            .await
            .unwrap();

        refresh_sentiment_analytics(&pool, question.id).await.unwrap();

        let stats = load_sentiment_analytics(&pool, question.id)
            .await
            .unwrap()
            .expect("analytics row missing");
        assert_eq!(stats.idea_positive, 1);
        assert_eq!(stats.idea_negative, 1);
        assert_eq!(stats.idea_neutral, 1);
        assert_eq!(stats.comment_positive, 1);
        assert_eq!(stats.comment_negative, 0);
        assert!((stats.mean_idea_sentiment - 0.0).abs() < 1e-9);
        assert!((stats.mean_comment_sentiment - 0.9).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_refresh_is_an_upsert() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        wisu_common::db::init_schema(&pool).await.unwrap();

        let question = Question::new("Q?".to_string(), "admin".to_string());
        crate::db::questions::save_question(&pool, &question)
            .await
            .unwrap();

        refresh_sentiment_analytics(&pool, question.id).await.unwrap();
        refresh_sentiment_analytics(&pool, question.id).await.unwrap();

        let stats = load_sentiment_analytics(&pool, question.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stats.idea_positive, 0);
    }
}
