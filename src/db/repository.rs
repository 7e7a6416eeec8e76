use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::error::AppError;
use crate::models::Profile;

/// Profiles are stored as whole JSON snapshots: the engine hands back a
/// full new snapshot per mutation and storage is last-writer-wins, so a
/// single `data` column carries the buckets and metadata.
#[derive(Debug, FromRow)]
struct ProfileRow {
    data: String,
}

/// Listing shape without the snapshot payload.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProfileSummary {
    pub id: String,
    pub name: String,
    pub owner: Option<String>,
    pub updated_at: String,
}

pub async fn insert_profile(db: &SqlitePool, profile: &Profile) -> Result<(), AppError> {
    let data = serde_json::to_string(profile)?;

    sqlx::query(
        "INSERT INTO profiles (id, owner, name, data, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&profile.id)
    .bind(&profile.owner)
    .bind(&profile.name)
    .bind(&data)
    .bind(&profile.created_at)
    .bind(&profile.updated_at)
    .execute(db)
    .await?;

    Ok(())
}

/// Persist a snapshot, inserting or overwriting whatever is stored.
pub async fn save_profile(db: &SqlitePool, profile: &Profile) -> Result<(), AppError> {
    match find_profile_by_id(db, &profile.id).await? {
        Some(_) => {
            let data = serde_json::to_string(profile)?;
            sqlx::query(
                "UPDATE profiles SET owner = ?, name = ?, data = ?, updated_at = ? WHERE id = ?",
            )
            .bind(&profile.owner)
            .bind(&profile.name)
            .bind(&data)
            .bind(&profile.updated_at)
            .bind(&profile.id)
            .execute(db)
            .await?;
            Ok(())
        }
        None => insert_profile(db, profile).await,
    }
}

pub async fn find_profile_by_id(db: &SqlitePool, id: &str) -> Result<Option<Profile>, AppError> {
    let row = sqlx::query_as::<_, ProfileRow>("SELECT data FROM profiles WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await?;

    match row {
        Some(row) => Ok(Some(serde_json::from_str(&row.data)?)),
        None => Ok(None),
    }
}

/// Most recently updated profile for one owner.
pub async fn find_latest_profile_by_owner(
    db: &SqlitePool,
    owner: &str,
) -> Result<Option<Profile>, AppError> {
    let row = sqlx::query_as::<_, ProfileRow>(
        "SELECT data FROM profiles WHERE owner = ? ORDER BY updated_at DESC LIMIT 1",
    )
    .bind(owner)
    .fetch_optional(db)
    .await?;

    match row {
        Some(row) => Ok(Some(serde_json::from_str(&row.data)?)),
        None => Ok(None),
    }
}

pub async fn list_profiles(
    db: &SqlitePool,
    owner: Option<&str>,
) -> Result<Vec<ProfileSummary>, AppError> {
    let summaries = match owner {
        Some(owner) => {
            sqlx::query_as::<_, ProfileSummary>(
                "SELECT id, name, owner, updated_at FROM profiles WHERE owner = ? ORDER BY updated_at DESC",
            )
            .bind(owner)
            .fetch_all(db)
            .await?
        }
        None => {
            sqlx::query_as::<_, ProfileSummary>(
                "SELECT id, name, owner, updated_at FROM profiles ORDER BY updated_at DESC",
            )
            .fetch_all(db)
            .await?
        }
    };

    Ok(summaries)
}

pub async fn delete_profile(db: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM profiles WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{add_course, new_profile};
    use crate::models::{Course, CourseLevel, Pace, Period, Term};

    async fn setup_test_db() -> SqlitePool {
        // One connection, or every pool checkout sees its own empty
        // in-memory database.
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test db");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    fn course(code: &str) -> Course {
        Course {
            code: code.to_string(),
            name: format!("Course {}", code),
            credits: 7.5,
            level: CourseLevel::Advanced,
            terms: vec![Term::Term7],
            periods: vec![Period::One],
            blocks: vec![1],
            pace: Pace::Full,
            examinations: vec!["TEN1".to_string()],
            campus: "Valla".to_string(),
            programs: vec!["D".to_string()],
            note: None,
        }
    }

    #[tokio::test]
    async fn insert_and_reload_round_trips_the_snapshot() {
        let pool = setup_test_db().await;

        let empty = new_profile("My master profile", Some("alice".to_string()));
        let profile = add_course(&empty, &course("TSBK02"), Term::Term7).expect("add");
        insert_profile(&pool, &profile).await.expect("insert");

        let loaded = find_profile_by_id(&pool, &profile.id)
            .await
            .expect("query")
            .expect("profile exists");
        assert_eq!(loaded, profile);
        assert_eq!(loaded.metadata.total_credits, 7.5);
    }

    #[tokio::test]
    async fn save_overwrites_the_stored_snapshot() {
        let pool = setup_test_db().await;

        let empty = new_profile("Plan", Some("alice".to_string()));
        insert_profile(&pool, &empty).await.expect("insert");

        let updated = add_course(&empty, &course("TSBK02"), Term::Term7).expect("add");
        save_profile(&pool, &updated).await.expect("save");

        let loaded = find_profile_by_id(&pool, &empty.id)
            .await
            .expect("query")
            .expect("profile exists");
        assert_eq!(loaded.term7.len(), 1);
    }

    #[tokio::test]
    async fn latest_by_owner_prefers_the_newest_update() {
        let pool = setup_test_db().await;

        let mut older = new_profile("Old plan", Some("alice".to_string()));
        older.updated_at = "2026-01-01T00:00:00+00:00".to_string();
        let mut newer = new_profile("New plan", Some("alice".to_string()));
        newer.updated_at = "2026-02-01T00:00:00+00:00".to_string();
        insert_profile(&pool, &older).await.expect("insert older");
        insert_profile(&pool, &newer).await.expect("insert newer");

        let latest = find_latest_profile_by_owner(&pool, "alice")
            .await
            .expect("query")
            .expect("profile exists");
        assert_eq!(latest.id, newer.id);

        assert!(
            find_latest_profile_by_owner(&pool, "bob")
                .await
                .expect("query")
                .is_none()
        );
    }

    #[tokio::test]
    async fn list_filters_by_owner() {
        let pool = setup_test_db().await;

        insert_profile(&pool, &new_profile("A", Some("alice".to_string())))
            .await
            .expect("insert");
        insert_profile(&pool, &new_profile("B", Some("bob".to_string())))
            .await
            .expect("insert");

        let all = list_profiles(&pool, None).await.expect("list");
        assert_eq!(all.len(), 2);

        let alices = list_profiles(&pool, Some("alice")).await.expect("list");
        assert_eq!(alices.len(), 1);
        assert_eq!(alices[0].name, "A");
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_went_away() {
        let pool = setup_test_db().await;

        let profile = new_profile("Plan", None);
        insert_profile(&pool, &profile).await.expect("insert");

        assert!(delete_profile(&pool, &profile.id).await.expect("delete"));
        assert!(!delete_profile(&pool, &profile.id).await.expect("delete again"));
        assert!(
            find_profile_by_id(&pool, &profile.id)
                .await
                .expect("query")
                .is_none()
        );
    }
}
