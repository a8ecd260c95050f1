use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    auth::CurrentIdentity,
    controllers::EntryIdResponse,
    db::favorites::{add_to_favorites, get_user_favorites, is_in_favorites, remove_from_favorites},
    error::Error,
    model::FavoriteEntry,
    state::SharedAppState,
};

#[derive(Deserialize, Serialize, Debug, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddToFavoritesRequest {
    #[validate(length(min = 1, max = 128))]
    pub manga_id: String,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InFavoritesResponse {
    pub in_favorites: bool,
}

#[tracing::instrument(name = "[GET] favorites", skip_all)]
pub async fn index(
    Extension(identity): Extension<CurrentIdentity>,
    State(app_state): State<SharedAppState>,
) -> Result<Json<Vec<FavoriteEntry>>, Error> {
    let Some(owner) = identity.get() else {
        return Ok(Json(Vec::new()));
    };

    let result = get_user_favorites(&app_state.pool, owner).await?;

    Ok(Json(result))
}

#[tracing::instrument(name = "[POST] favorites", skip_all, fields(manga_id = %request.manga_id))]
pub async fn store(
    Extension(identity): Extension<CurrentIdentity>,
    State(app_state): State<SharedAppState>,
    Json(request): Json<AddToFavoritesRequest>,
) -> Result<Json<EntryIdResponse>, Error> {
    let owner = identity.require()?;
    request.validate().map_err(Error::Validation)?;

    let id = add_to_favorites(&app_state.pool, owner, &request.manga_id).await?;

    Ok(Json(EntryIdResponse { id }))
}

#[tracing::instrument(name = "[GET] favorites/{manga_id}", skip_all, fields(manga_id = %manga_id))]
pub async fn show(
    Extension(identity): Extension<CurrentIdentity>,
    State(app_state): State<SharedAppState>,
    Path(manga_id): Path<String>,
) -> Result<Json<InFavoritesResponse>, Error> {
    let owner = identity.require()?;

    let in_favorites = is_in_favorites(&app_state.pool, owner, &manga_id).await?;

    Ok(Json(InFavoritesResponse { in_favorites }))
}

#[tracing::instrument(name = "[DELETE] favorites/{manga_id}", skip_all, fields(manga_id = %manga_id))]
pub async fn destroy(
    Extension(identity): Extension<CurrentIdentity>,
    State(app_state): State<SharedAppState>,
    Path(manga_id): Path<String>,
) -> Result<StatusCode, Error> {
    let owner = identity.require()?;

    remove_from_favorites(&app_state.pool, owner, &manga_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
