//! Demographic profile operations
//!
//! At most one profile per visitor: INSERT OR IGNORE keeps the first
//! submission and silently drops later ones.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use wisu_common::db::models::Profile;

/// Save a profile if the visitor doesn't already have one.
///
/// Returns true when the row was inserted, false when a profile already
/// existed and the submission was ignored.
pub async fn save_profile_once(pool: &SqlitePool, profile: &Profile) -> Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT OR IGNORE INTO profiles (visitor_id, country, age, gender, occupation, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&profile.visitor_id)
    .bind(&profile.country)
    .bind(profile.age)
    .bind(&profile.gender)
    .bind(&profile.occupation)
    .bind(profile.created_at)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Load a visitor's profile, if any
pub async fn load_profile(pool: &SqlitePool, visitor_id: &str) -> Result<Option<Profile>> {
    let row = sqlx::query(
        r#"
        SELECT visitor_id, country, age, gender, occupation, created_at
        FROM profiles
        WHERE visitor_id = ?
        "#,
    )
    .bind(visitor_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| Profile {
        visitor_id: row.get("visitor_id"),
        country: row.get("country"),
        age: row.get("age"),
        gender: row.get("gender"),
        occupation: row.get("occupation"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
    }))
}

/// Whether the visitor has already submitted a profile
pub async fn has_profile(pool: &SqlitePool, visitor_id: &str) -> Result<bool> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM profiles WHERE visitor_id = ?)")
            .bind(visitor_id)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_profile_is_insert_once() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        wisu_common::db::init_schema(&pool).await.unwrap();

        let first = Profile {
            visitor_id: "visitor-1".to_string(),
            country: Some("Senegal".to_string()),
            age: Some(25),
            gender: None,
            occupation: Some("Student".to_string()),
            created_at: Utc::now(),
        };
        assert!(save_profile_once(&pool, &first).await.unwrap());
        assert!(has_profile(&pool, "visitor-1").await.unwrap());

        // A second submission never overwrites the first
        let second = Profile {
            country: Some("Ghana".to_string()),
            ..first.clone()
        };
        assert!(!save_profile_once(&pool, &second).await.unwrap());

        let loaded = load_profile(&pool, "visitor-1").await.unwrap().unwrap();
        assert_eq!(loaded.country.as_deref(), Some("Senegal"));
    }
}
