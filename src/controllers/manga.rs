use std::borrow::Cow;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    catalog::{CatalogQuery, Length, SortBy, paginate},
    db::{
        chapters::{get_chapter_pages, get_chapters},
        manga::{get_all_mangas, get_manga_by_id},
    },
    error::Error,
    model::{Chapter, Manga, MangaStatus, Page},
    state::SharedAppState,
};

const DEFAULT_LIMIT: i64 = 20;

#[tracing::instrument(name = "[GET] manga", skip_all, fields(browse = ?browse))]
pub async fn index(
    State(app_state): State<SharedAppState>,
    Query(browse): Query<BrowseQuery>,
) -> Result<Json<Vec<Manga>>, Error> {
    browse.validate().map_err(Error::Validation)?;
    let (query, offset, limit) = browse.into_catalog_query().map_err(Error::Validation)?;

    let mangas = get_all_mangas(&app_state.pool).await?;
    let result = paginate(query.apply(mangas), offset, limit);

    Ok(Json(result))
}

#[tracing::instrument(name = "[GET] manga/{id}", skip_all, fields(id = %id))]
pub async fn show(
    State(app_state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<Json<Manga>, Error> {
    let result = get_manga_by_id(&app_state.pool, &id).await?;

    Ok(Json(result))
}

#[tracing::instrument(name = "[GET] manga/{id}/chapters", skip_all, fields(id = %id))]
pub async fn chapters(
    State(app_state): State<SharedAppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Chapter>>, Error> {
    let result = get_chapters(&app_state.pool, &id).await?;

    Ok(Json(result))
}

#[tracing::instrument(
    name = "[GET] manga/{id}/chapters/{number}/pages",
    skip_all,
    fields(id = %id, number = number)
)]
pub async fn pages(
    State(app_state): State<SharedAppState>,
    Path((id, number)): Path<(String, i64)>,
) -> Result<Json<Vec<Page>>, Error> {
    let result = get_chapter_pages(&app_state.pool, &id, number).await?;

    Ok(Json(result))
}

#[derive(serde::Deserialize, serde::Serialize, Debug, Default, Validate)]
pub struct BrowseQuery {
    search: Option<String>,

    /// Comma-separated genre keys.
    genres: Option<String>,

    /// Comma-separated statuses.
    statuses: Option<String>,

    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    #[validate(range(min = 0.0, max = 5.0))]
    min_rating: Option<f64>,

    length: Option<String>,

    sort: Option<String>,

    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    #[validate(range(min = 0))]
    offset: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    #[validate(range(min = 1, max = 100))]
    limit: Option<i64>,
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl BrowseQuery {
    /// Resolves the textual parameters into a [`CatalogQuery`] plus the
    /// page offset and limit.
    pub fn into_catalog_query(self) -> Result<(CatalogQuery, usize, usize), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let mut statuses = Vec::new();
        for status in split_list(self.statuses.as_deref()) {
            match status.parse::<MangaStatus>() {
                Ok(status) => statuses.push(status),
                Err(message) => errors.add(
                    "statuses",
                    ValidationError::new("statuses_unknown").with_message(Cow::from(message)),
                ),
            }
        }

        let length = self
            .length
            .as_deref()
            .unwrap_or_default()
            .parse::<Length>()
            .unwrap_or_else(|message| {
                errors.add(
                    "length",
                    ValidationError::new("length_unknown").with_message(Cow::from(message)),
                );
                Length::All
            });

        let sort = self
            .sort
            .as_deref()
            .unwrap_or_default()
            .parse::<SortBy>()
            .unwrap_or_else(|message| {
                errors.add(
                    "sort",
                    ValidationError::new("sort_unknown").with_message(Cow::from(message)),
                );
                SortBy::Latest
            });

        if !errors.errors().is_empty() {
            return Err(errors);
        }

        let query = CatalogQuery {
            search: self.search,
            genres: split_list(self.genres.as_deref()),
            statuses,
            min_rating: self.min_rating,
            length,
            sort,
        };
        let offset = self.offset.unwrap_or(0).max(0) as usize;
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, 100) as usize;

        Ok((query, offset, limit))
    }
}
