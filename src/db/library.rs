use sqlx::SqlitePool;

use crate::{auth::Identity, error::Error, model::LibraryEntry};

use super::{error::DatabaseError, now_millis};

/// Adds `manga_id` to the owner's library, or refreshes `last_read` and
/// `chapter` when it is already there. Returns the entry id either way.
#[tracing::instrument(
    name = "add to library",
    skip(pool, owner),
    fields(owner = %owner)
)]
pub async fn add_to_library(
    pool: &SqlitePool,
    owner: &Identity,
    manga_id: &str,
    chapter: Option<f64>,
) -> Result<i64, Error> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO user_library
            (owner_id, manga_id, added_at, last_read, chapter)
        VALUES
            (?1, ?2, ?3, ?3, ?4)
        ON CONFLICT (owner_id, manga_id)
        DO UPDATE SET
            last_read = excluded.last_read,
            chapter = excluded.chapter
        RETURNING id;
    "#,
    )
    .bind(owner.subject())
    .bind(manga_id)
    .bind(now_millis())
    .bind(chapter)
    .fetch_one(pool)
    .await
    .map_err(DatabaseError::DatabaseError)?;

    Ok(id)
}

/// Returns whether an entry was deleted. Removing a missing entry is not an error.
#[tracing::instrument(
    name = "remove from library",
    skip(pool, owner),
    fields(owner = %owner)
)]
pub async fn remove_from_library(
    pool: &SqlitePool,
    owner: &Identity,
    manga_id: &str,
) -> Result<bool, Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM user_library
        WHERE
            owner_id = ?1 AND manga_id = ?2;
    "#,
    )
    .bind(owner.subject())
    .bind(manga_id)
    .execute(pool)
    .await
    .map_err(DatabaseError::DatabaseError)?;

    Ok(result.rows_affected() > 0)
}

#[tracing::instrument(
    name = "get user library",
    skip(pool, owner),
    fields(owner = %owner)
)]
pub async fn get_user_library(
    pool: &SqlitePool,
    owner: &Identity,
) -> Result<Vec<LibraryEntry>, Error> {
    let entries = sqlx::query_as::<_, LibraryEntry>(
        r#"
        SELECT
            id, owner_id, manga_id, added_at, last_read, chapter
        FROM
            user_library
        WHERE
            owner_id = ?1
        ORDER BY id DESC;
    "#,
    )
    .bind(owner.subject())
    .fetch_all(pool)
    .await
    .map_err(DatabaseError::DatabaseError)?;

    Ok(entries)
}

#[tracing::instrument(
    name = "is in library",
    skip(pool, owner),
    fields(owner = %owner)
)]
pub async fn is_in_library(
    pool: &SqlitePool,
    owner: &Identity,
    manga_id: &str,
) -> Result<bool, Error> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM user_library WHERE owner_id = ?1 AND manga_id = ?2
        );
    "#,
    )
    .bind(owner.subject())
    .bind(manga_id)
    .fetch_one(pool)
    .await
    .map_err(DatabaseError::DatabaseError)?;

    Ok(exists)
}
