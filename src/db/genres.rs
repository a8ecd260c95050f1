use sqlx::{QueryBuilder, Sqlite};

use crate::{error::Error, model::MangaGenreEntity};

use super::{SqliteTransaction, error::DatabaseError};

pub async fn insert_manga_genres(
    tx: &mut SqliteTransaction,
    data: &[MangaGenreEntity],
) -> Result<(), Error> {
    for batch in data.chunks(300) {
        let mut genre_builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"
            INSERT INTO manga_genres
                (manga_id, genre)
        "#,
        );

        genre_builder.push_values(batch, |mut b, manga_genre| {
            b.push_bind(&manga_genre.manga_id)
                .push_bind(manga_genre.genre.to_lowercase());
        });
        genre_builder.push(" ON CONFLICT (manga_id, genre) DO NOTHING;");

        genre_builder
            .build()
            .execute(&mut **tx)
            .await
            .map_err(DatabaseError::DatabaseError)?;
    }

    Ok(())
}
