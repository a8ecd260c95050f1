use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::{
    error::Error,
    model::{Chapter, Page, PageEntity},
};

use super::{SqliteTransaction, error::DatabaseError, manga::manga_exists};

#[tracing::instrument(name = "get chapters by manga", skip(pool))]
pub async fn get_chapters(pool: &SqlitePool, manga_id: &str) -> Result<Vec<Chapter>, Error> {
    if !manga_exists(pool, manga_id).await? {
        return Err(Error::Database(DatabaseError::NotFound));
    }

    let chapters = sqlx::query_as::<_, Chapter>(
        r#"
        SELECT
            manga_id, number, title, released_at, pages
        FROM
            chapters
        WHERE
            manga_id = ?1
        ORDER BY number;
    "#,
    )
    .bind(manga_id)
    .fetch_all(pool)
    .await
    .map_err(DatabaseError::DatabaseError)?;

    Ok(chapters)
}

/// Pages of one chapter in reading order. Unknown chapters are `NotFound`.
#[tracing::instrument(name = "get chapter pages", skip(pool))]
pub async fn get_chapter_pages(
    pool: &SqlitePool,
    manga_id: &str,
    chapter: i64,
) -> Result<Vec<Page>, Error> {
    let chapter_exists = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM chapters WHERE manga_id = ?1 AND number = ?2
        );
    "#,
    )
    .bind(manga_id)
    .bind(chapter)
    .fetch_one(pool)
    .await
    .map_err(DatabaseError::DatabaseError)?;

    if !chapter_exists {
        return Err(Error::Database(DatabaseError::NotFound));
    }

    let pages = sqlx::query_as::<_, Page>(
        r#"
        SELECT
            page_number, image_url
        FROM
            chapter_pages
        WHERE
            manga_id = ?1 AND chapter = ?2
        ORDER BY page_number;
    "#,
    )
    .bind(manga_id)
    .bind(chapter)
    .fetch_all(pool)
    .await
    .map_err(DatabaseError::DatabaseError)?;

    Ok(pages)
}

pub async fn insert_chapters(tx: &mut SqliteTransaction, data: &[Chapter]) -> Result<(), Error> {
    for batch in data.chunks(200) {
        let mut chapter_builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"
            INSERT INTO chapters
                (manga_id, number, title, released_at, pages)
        "#,
        );

        chapter_builder.push_values(batch, |mut b, chapter| {
            b.push_bind(&chapter.manga_id)
                .push_bind(chapter.number)
                .push_bind(&chapter.title)
                .push_bind(chapter.released_at)
                .push_bind(chapter.pages);
        });

        chapter_builder.push(
            "
            ON CONFLICT (manga_id, number)
            DO UPDATE SET
                title = excluded.title,
                released_at = excluded.released_at,
                pages = excluded.pages;
",
        );

        chapter_builder
            .build()
            .execute(&mut **tx)
            .await
            .map_err(DatabaseError::DatabaseError)?;
    }

    Ok(())
}

pub async fn insert_pages(tx: &mut SqliteTransaction, data: &[PageEntity]) -> Result<(), Error> {
    for batch in data.chunks(300) {
        let mut page_builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"
            INSERT INTO chapter_pages
                (manga_id, chapter, page_number, image_url)
        "#,
        );

        page_builder.push_values(batch, |mut b, page| {
            b.push_bind(&page.manga_id)
                .push_bind(page.chapter)
                .push_bind(page.page_number)
                .push_bind(&page.image_url);
        });

        page_builder.push(
            " ON CONFLICT (manga_id, chapter, page_number) DO UPDATE SET image_url = excluded.image_url;",
        );

        page_builder
            .build()
            .execute(&mut **tx)
            .await
            .map_err(DatabaseError::DatabaseError)?;
    }

    Ok(())
}
