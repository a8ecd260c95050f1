use fake::{
    Fake,
    faker::{lorem::en::Sentence, name::en::Name},
};
use mangashelf::{
    db::{
        chapters::{insert_chapters, insert_pages},
        genres::insert_manga_genres,
        manga::insert_mangas,
    },
    model::{Chapter, Manga, MangaGenreEntity, MangaStatus, PageEntity},
};
use rand::Rng;
use sqlx::SqlitePool;

pub async fn insert_manga(pool: &SqlitePool, manga: Manga) -> Manga {
    let mut tx = pool.begin().await.unwrap();

    let genres: Vec<MangaGenreEntity> = manga
        .genres
        .iter()
        .map(|genre| MangaGenreEntity {
            manga_id: manga.id.clone(),
            genre: genre.clone(),
        })
        .collect();

    insert_mangas(&mut tx, std::slice::from_ref(&manga))
        .await
        .unwrap();
    insert_manga_genres(&mut tx, &genres).await.unwrap();

    tx.commit().await.unwrap();

    manga
}

pub async fn insert_fake_manga(pool: &SqlitePool, genres: &[&str]) -> Manga {
    insert_manga(pool, create_fake_manga(genres)).await
}

pub fn create_fake_manga(genres: &[&str]) -> Manga {
    let mut rng = rand::rng();
    let id: u32 = rng.random();

    Manga {
        id: id.to_string(),
        title: Name().fake(),
        author: Name().fake(),
        description: Sentence(3..8).fake(),
        cover_image: format!("https://covers.example/{}.jpg", id),
        status: MangaStatus::Ongoing,
        rating: rng.random_range(1.0..5.0),
        chapters: rng.random_range(1..400),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        added_at: rng.random_range(1..1_000_000),
    }
}

/// Inserts chapter `number` of `manga_id` with `pages` sequential pages.
pub async fn insert_fake_chapter(pool: &SqlitePool, manga_id: &str, number: i64, pages: i64) {
    let mut tx = pool.begin().await.unwrap();

    let chapter = Chapter {
        manga_id: manga_id.to_string(),
        number,
        title: Sentence(1..4).fake(),
        released_at: 1_700_000_000_000 + number,
        pages,
    };
    // Inserted in reverse to show ordering comes from storage, not insertion.
    let page_entities: Vec<PageEntity> = (1..=pages)
        .rev()
        .map(|page_number| PageEntity {
            manga_id: manga_id.to_string(),
            chapter: number,
            page_number,
            image_url: format!(
                "https://pages.example/{}/{}/{}.webp",
                manga_id, number, page_number
            ),
        })
        .collect();

    insert_chapters(&mut tx, &[chapter]).await.unwrap();
    insert_pages(&mut tx, &page_entities).await.unwrap();

    tx.commit().await.unwrap();
}
