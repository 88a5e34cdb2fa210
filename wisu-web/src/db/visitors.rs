//! Visitor registry operations
//!
//! Visitors carry a client-persisted anonymous id; registration is an
//! upsert so repeat contacts refresh the browser field without erroring.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use wisu_common::db::models::Visitor;

/// Register a visitor, updating the browser name on repeat contact
pub async fn upsert_visitor(pool: &SqlitePool, visitor: &Visitor) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO visitors (visitor_id, browser, created_at)
        VALUES (?, ?, ?)
        ON CONFLICT(visitor_id) DO UPDATE SET
            browser = excluded.browser
        "#,
    )
    .bind(&visitor.visitor_id)
    .bind(&visitor.browser)
    .bind(visitor.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load a visitor record
pub async fn load_visitor(pool: &SqlitePool, visitor_id: &str) -> Result<Option<Visitor>> {
    let row = sqlx::query(
        r#"
        SELECT visitor_id, browser, created_at
        FROM visitors
        WHERE visitor_id = ?
        "#,
    )
    .bind(visitor_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| Visitor {
        visitor_id: row.get("visitor_id"),
        browser: row.get("browser"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_visitor_refreshes_browser() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        wisu_common::db::init_schema(&pool).await.unwrap();

        let visitor = Visitor {
            visitor_id: "visitor-1".to_string(),
            browser: Some("Firefox".to_string()),
            created_at: Utc::now(),
        };
        upsert_visitor(&pool, &visitor).await.unwrap();

        let again = Visitor {
            browser: Some("Chrome".to_string()),
            ..visitor.clone()
        };
        upsert_visitor(&pool, &again).await.unwrap();

        let loaded = load_visitor(&pool, "visitor-1").await.unwrap().unwrap();
        assert_eq!(loaded.browser.as_deref(), Some("Chrome"));
    }
}
