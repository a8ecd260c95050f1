use std::collections::HashMap;

use futures::TryStreamExt;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use crate::{
    error::Error,
    model::{Manga, MangaStatus},
};

use super::{SqliteTransaction, error::DatabaseError};

#[derive(sqlx::FromRow)]
struct MangaRecord {
    id: String,
    title: String,
    author: String,
    description: String,
    cover_image: String,
    status: String,
    rating: f64,
    chapters: i64,
    added_at: i64,
}

impl MangaRecord {
    fn into_domain(self, genres: Vec<String>) -> Result<Manga, DatabaseError> {
        let status: MangaStatus = self.status.parse().map_err(DatabaseError::Corrupted)?;

        Ok(Manga {
            id: self.id,
            title: self.title,
            author: self.author,
            description: self.description,
            cover_image: self.cover_image,
            status,
            rating: self.rating,
            chapters: self.chapters,
            genres,
            added_at: self.added_at,
        })
    }
}

/// Loads the whole catalog with genres attached. Filtering and ordering for
/// browsing happen in [`crate::catalog`].
#[tracing::instrument(name = "get all manga", skip_all)]
pub async fn get_all_mangas(pool: &SqlitePool) -> Result<Vec<Manga>, Error> {
    let manga_raw = sqlx::query_as::<_, MangaRecord>(
        r#"
        SELECT
            id, title, author,
            description, cover_image, status,
            rating, chapters, added_at
        FROM
            mangas
        ORDER BY id;
    "#,
    )
    .fetch_all(pool)
    .await
    .map_err(DatabaseError::DatabaseError)?;

    if manga_raw.is_empty() {
        return Ok(Vec::new());
    }

    let mut genre_stream = sqlx::query(
        r#"
        SELECT
            manga_id, genre
        FROM
            manga_genres
        ORDER BY manga_id, genre;
    "#,
    )
    .fetch(pool);

    let mut genres: HashMap<String, Vec<String>> = HashMap::new();
    while let Some(row) = genre_stream
        .try_next()
        .await
        .map_err(DatabaseError::DatabaseError)?
    {
        genres
            .entry(row.get("manga_id"))
            .or_default()
            .push(row.get("genre"));
    }

    let mut mangas = Vec::with_capacity(manga_raw.len());
    for manga in manga_raw {
        let manga_genres = genres.remove(&manga.id).unwrap_or_default();
        mangas.push(manga.into_domain(manga_genres)?);
    }

    Ok(mangas)
}

#[tracing::instrument(name = "get manga by id", skip(pool))]
pub async fn get_manga_by_id(pool: &SqlitePool, manga_id: &str) -> Result<Manga, Error> {
    let manga_raw = match sqlx::query_as::<_, MangaRecord>(
        r#"
        SELECT
            id, title, author,
            description, cover_image, status,
            rating, chapters, added_at
        FROM
            mangas
        WHERE
            id = ?1;
    "#,
    )
    .bind(manga_id)
    .fetch_optional(pool)
    .await
    .map_err(DatabaseError::DatabaseError)?
    {
        Some(manga) => manga,
        None => {
            return Err(Error::Database(DatabaseError::NotFound));
        }
    };

    let genres = sqlx::query_scalar::<_, String>(
        r#"
        SELECT
            genre
        FROM
            manga_genres
        WHERE
            manga_id = ?1
        ORDER BY genre;
    "#,
    )
    .bind(manga_id)
    .fetch_all(pool)
    .await
    .map_err(DatabaseError::DatabaseError)?;

    Ok(manga_raw.into_domain(genres)?)
}

#[tracing::instrument(name = "manga exists", skip(pool))]
pub async fn manga_exists(pool: &SqlitePool, manga_id: &str) -> Result<bool, Error> {
    let exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (SELECT 1 FROM mangas WHERE id = ?1);
    "#,
    )
    .bind(manga_id)
    .fetch_one(pool)
    .await
    .map_err(DatabaseError::DatabaseError)?;

    Ok(exists)
}

/// Upserts catalog rows. Genres are stored separately by
/// [`insert_manga_genres`](super::genres::insert_manga_genres).
pub async fn insert_mangas(tx: &mut SqliteTransaction, data: &[Manga]) -> Result<(), Error> {
    for batch in data.chunks(100) {
        let mut manga_builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"
            INSERT INTO mangas
                (id, title, author, description, cover_image, status, rating, chapters, added_at)
        "#,
        );

        manga_builder.push_values(batch, |mut b, manga| {
            b.push_bind(&manga.id)
                .push_bind(&manga.title)
                .push_bind(&manga.author)
                .push_bind(&manga.description)
                .push_bind(&manga.cover_image)
                .push_bind(manga.status.as_str())
                .push_bind(manga.rating.clamp(0.0, 5.0))
                .push_bind(manga.chapters.max(0))
                .push_bind(manga.added_at);
        });

        manga_builder.push(
            "
            ON CONFLICT (id)
            DO UPDATE SET
                title = excluded.title,
                author = excluded.author,
                description = excluded.description,
                cover_image = excluded.cover_image,
                status = excluded.status,
                rating = excluded.rating,
                chapters = excluded.chapters;
",
        );

        manga_builder
            .build()
            .execute(&mut **tx)
            .await
            .map_err(DatabaseError::DatabaseError)?;
    }

    Ok(())
}
