//! Browse-time filtering and ordering of the catalog.

use std::str::FromStr;

use crate::model::{Manga, MangaStatus};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Most recently added first.
    #[default]
    Latest,
    Newest,
    Title,
    Rating,
    Chapters,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "latest" => Ok(SortBy::Latest),
            "newest" => Ok(SortBy::Newest),
            "title" => Ok(SortBy::Title),
            "rating" => Ok(SortBy::Rating),
            "chapters" => Ok(SortBy::Chapters),
            other => Err(format!("{} is not a known sort order", other)),
        }
    }
}

/// Chapter-count buckets offered by the browse view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Length {
    #[default]
    All,
    /// Up to 50 chapters.
    Short,
    /// 51 to 200 chapters.
    Medium,
    /// More than 200 chapters.
    Long,
}

impl Length {
    pub fn matches(&self, chapters: i64) -> bool {
        match self {
            Length::All => true,
            Length::Short => chapters <= 50,
            Length::Medium => chapters > 50 && chapters <= 200,
            Length::Long => chapters > 200,
        }
    }
}

impl FromStr for Length {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(Length::All),
            "short" => Ok(Length::Short),
            "medium" => Ok(Length::Medium),
            "long" => Ok(Length::Long),
            other => Err(format!("{} is not a known length", other)),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CatalogQuery {
    pub search: Option<String>,
    /// A title matches when it carries any of these genres.
    pub genres: Vec<String>,
    pub statuses: Vec<MangaStatus>,
    pub min_rating: Option<f64>,
    pub length: Length,
    pub sort: SortBy,
}

impl CatalogQuery {
    pub fn matches(&self, manga: &Manga) -> bool {
        if !self.genres.is_empty()
            && !self
                .genres
                .iter()
                .any(|genre| manga.genres.iter().any(|g| g.eq_ignore_ascii_case(genre)))
        {
            return false;
        }

        if !self.statuses.is_empty() && !self.statuses.contains(&manga.status) {
            return false;
        }

        if self
            .min_rating
            .is_some_and(|min_rating| min_rating > 0.0 && manga.rating < min_rating)
        {
            return false;
        }

        if !self.length.matches(manga.chapters) {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            Some(search) if !search.is_empty() => {
                let needle = search.to_lowercase();

                manga.title.to_lowercase().contains(&needle)
                    || manga.author.to_lowercase().contains(&needle)
                    || manga.description.to_lowercase().contains(&needle)
                    || manga
                        .genres
                        .iter()
                        .any(|genre| genre.to_lowercase().contains(&needle))
            }
            _ => true,
        }
    }

    /// Filters then orders `mangas`. Ties keep the incoming order.
    pub fn apply(&self, mangas: Vec<Manga>) -> Vec<Manga> {
        let mut filtered: Vec<Manga> = mangas.into_iter().filter(|m| self.matches(m)).collect();

        match self.sort {
            SortBy::Latest | SortBy::Newest => filtered.sort_by(|a, b| b.added_at.cmp(&a.added_at)),
            SortBy::Title => {
                filtered.sort_by_cached_key(|m| m.title.to_lowercase());
            }
            SortBy::Rating => filtered.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            SortBy::Chapters => filtered.sort_by(|a, b| b.chapters.cmp(&a.chapters)),
        }

        filtered
    }
}

/// Slice of a result set; `offset` counts pages of `limit` items.
pub fn paginate<T>(items: Vec<T>, offset: usize, limit: usize) -> Vec<T> {
    items
        .into_iter()
        .skip(offset.saturating_mul(limit))
        .take(limit)
        .collect()
}
