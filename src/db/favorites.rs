use sqlx::SqlitePool;

use crate::{auth::Identity, error::Error, model::FavoriteEntry};

use super::{error::DatabaseError, now_millis};

/// Adds `manga_id` to the owner's favorites. A repeated add keeps the
/// first entry (and its `added_at`) and returns its id.
#[tracing::instrument(
    name = "add to favorites",
    skip(pool, owner),
    fields(owner = %owner)
)]
pub async fn add_to_favorites(
    pool: &SqlitePool,
    owner: &Identity,
    manga_id: &str,
) -> Result<i64, Error> {
    // The no-op update makes RETURNING yield the existing row on conflict.
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO user_favorites
            (owner_id, manga_id, added_at)
        VALUES
            (?1, ?2, ?3)
        ON CONFLICT (owner_id, manga_id)
        DO UPDATE SET
            manga_id = excluded.manga_id
        RETURNING id;
    "#,
    )
    .bind(owner.subject())
    .bind(manga_id)
    .bind(now_millis())
    .fetch_one(pool)
    .await
    .map_err(DatabaseError::DatabaseError)?;

    Ok(id)
}

#[tracing::instrument(
    name = "remove from favorites",
    skip(pool, owner),
    fields(owner = %owner)
)]
pub async fn remove_from_favorites(
    pool: &SqlitePool,
    owner: &Identity,
    manga_id: &str,
) -> Result<bool, Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM user_favorites
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
    name = "get user favorites",
    skip(pool, owner),
    fields(owner = %owner)
)]
pub async fn get_user_favorites(
    pool: &SqlitePool,
    owner: &Identity,
) -> Result<Vec<FavoriteEntry>, Error> {
    let entries = sqlx::query_as::<_, FavoriteEntry>(
        r#"
        SELECT
            id, owner_id, manga_id, added_at
        FROM
            user_favorites
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
    name = "is in favorites",
    skip(pool, owner),
    fields(owner = %owner)
)]
pub async fn is_in_favorites(
    pool: &SqlitePool,
    owner: &Identity,
    manga_id: &str,
) -> Result<bool, Error> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM user_favorites WHERE owner_id = ?1 AND manga_id = ?2
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
