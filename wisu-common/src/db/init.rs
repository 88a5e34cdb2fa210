//! Database initialization
//!
//! Creates the database on first run and brings the schema up idempotently.
//! Every `create_*_table` uses CREATE TABLE IF NOT EXISTS so startup is safe
//! to repeat against an existing database.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::{info, warn};

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL mode allows concurrent readers while one visitor's vote is written
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    init_schema(&pool).await?;
    init_default_settings(&pool).await?;

    Ok(pool)
}

/// Create all tables (idempotent). Also usable against an in-memory pool
/// from tests.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    create_settings_table(pool).await?;
    create_visitors_table(pool).await?;
    create_questions_table(pool).await?;
    create_ideas_table(pool).await?;
    create_votes_table(pool).await?;
    create_comments_table(pool).await?;
    create_profiles_table(pool).await?;
    create_sentiment_analytics_table(pool).await?;
    Ok(())
}

/// Create the settings table
///
/// Stores application configuration key-value pairs.
pub async fn create_settings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_visitors_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS visitors (
            visitor_id TEXT PRIMARY KEY,
            browser TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (length(visitor_id) > 0 AND length(visitor_id) <= 100)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the questions table
///
/// Questions are immutable after creation and own their ideas.
pub async fn create_questions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id TEXT PRIMARY KEY,
            text TEXT NOT NULL,
            creator_ref TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (length(text) > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_questions_created ON questions(created_at)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the ideas table
///
/// Sentiment columns are written once at insert time and never updated.
pub async fn create_ideas_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ideas (
            id TEXT PRIMARY KEY,
            question_id TEXT NOT NULL REFERENCES questions(id),
            text TEXT NOT NULL,
            provenance TEXT NOT NULL CHECK (provenance IN ('original', 'contributed')),
            visitor_id TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            sentiment_score REAL NOT NULL DEFAULT 0.0,
            sentiment_label TEXT NOT NULL DEFAULT 'Neutral'
                CHECK (sentiment_label IN ('Positive', 'Negative', 'Neutral')),
            CHECK (length(text) > 0),
            CHECK (sentiment_score >= -1.0 AND sentiment_score <= 1.0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_ideas_question ON ideas(question_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the votes table
///
/// Append-only ledger. Deliberately no uniqueness constraint on
/// (visitor, question, pair): a replayed stale pair inserts a duplicate
/// vote, matching the documented behavior.
pub async fn create_votes_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS votes (
            id TEXT PRIMARY KEY,
            visitor_id TEXT NOT NULL,
            question_id TEXT NOT NULL REFERENCES questions(id),
            winner_idea_id TEXT NOT NULL REFERENCES ideas(id),
            loser_idea_id TEXT NOT NULL REFERENCES ideas(id),
            voted_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (winner_idea_id <> loser_idea_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_votes_visitor_question ON votes(visitor_id, question_id)",
    )
    .execute(pool)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_votes_question ON votes(question_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_comments_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            id TEXT PRIMARY KEY,
            question_id TEXT NOT NULL REFERENCES questions(id),
            visitor_id TEXT NOT NULL,
            text TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            sentiment_score REAL NOT NULL DEFAULT 0.0,
            sentiment_label TEXT NOT NULL DEFAULT 'Neutral'
                CHECK (sentiment_label IN ('Positive', 'Negative', 'Neutral')),
            CHECK (length(text) > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_comments_question ON comments(question_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the profiles table
///
/// At most one row per visitor; writes use INSERT OR IGNORE so a second
/// submission never overwrites the first.
pub async fn create_profiles_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            visitor_id TEXT PRIMARY KEY,
            country TEXT,
            age INTEGER,
            gender TEXT,
            occupation TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (age IS NULL OR (age >= 10 AND age <= 120))
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the sentiment_analytics cache table
pub async fn create_sentiment_analytics_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sentiment_analytics (
            question_id TEXT PRIMARY KEY REFERENCES questions(id),
            mean_idea_sentiment REAL NOT NULL DEFAULT 0.0,
            mean_comment_sentiment REAL NOT NULL DEFAULT 0.0,
            idea_positive INTEGER NOT NULL DEFAULT 0,
            idea_negative INTEGER NOT NULL DEFAULT 0,
            idea_neutral INTEGER NOT NULL DEFAULT 0,
            comment_positive INTEGER NOT NULL DEFAULT 0,
            comment_negative INTEGER NOT NULL DEFAULT 0,
            comment_neutral INTEGER NOT NULL DEFAULT 0,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Initialize or update default settings
async fn init_default_settings(pool: &SqlitePool) -> Result<()> {
    ensure_setting(pool, "http_port", "5780").await?;
    ensure_setting(pool, "http_request_timeout_ms", "30000").await?;
    ensure_setting(pool, "http_max_body_size_bytes", "1048576").await?;

    info!("Default settings initialized");
    Ok(())
}

/// Ensure a setting exists with the specified default value
///
/// If the setting doesn't exist, it will be created with the default.
/// If the setting exists but has a NULL value, it will be reset to the default.
pub async fn ensure_setting(pool: &SqlitePool, key: &str, default_value: &str) -> Result<()> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM settings WHERE key = ?)")
        .bind(key)
        .fetch_one(pool)
        .await?;

    if !exists {
        // INSERT OR IGNORE handles concurrent initialization races
        sqlx::query("INSERT OR IGNORE INTO settings (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(default_value)
            .execute(pool)
            .await?;

        info!("Initialized setting '{}' with default value: {}", key, default_value);
        return Ok(());
    }

    let value: Option<String> = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_one(pool)
        .await?;

    if value.is_none() {
        sqlx::query("UPDATE settings SET value = ? WHERE key = ?")
            .bind(default_value)
            .bind(key)
            .execute(pool)
            .await?;

        warn!("Setting '{}' was NULL, reset to default: {}", key, default_value);
    }

    Ok(())
}
