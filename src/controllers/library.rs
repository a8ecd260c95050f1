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
    db::library::{add_to_library, get_user_library, is_in_library, remove_from_library},
    error::Error,
    model::LibraryEntry,
    state::SharedAppState,
};

#[derive(Deserialize, Serialize, Debug, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddToLibraryRequest {
    #[validate(length(min = 1, max = 128))]
    pub manga_id: String,
    #[validate(range(min = 0.0))]
    pub chapter: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InLibraryResponse {
    pub in_library: bool,
}

/// Anonymous callers get an empty library rather than an error.
#[tracing::instrument(name = "[GET] library", skip_all)]
pub async fn index(
    Extension(identity): Extension<CurrentIdentity>,
    State(app_state): State<SharedAppState>,
) -> Result<Json<Vec<LibraryEntry>>, Error> {
    let Some(owner) = identity.get() else {
        return Ok(Json(Vec::new()));
    };

    let result = get_user_library(&app_state.pool, owner).await?;

    Ok(Json(result))
}

#[tracing::instrument(name = "[POST] library", skip_all, fields(manga_id = %request.manga_id))]
pub async fn store(
    Extension(identity): Extension<CurrentIdentity>,
    State(app_state): State<SharedAppState>,
    Json(request): Json<AddToLibraryRequest>,
) -> Result<Json<EntryIdResponse>, Error> {
    let owner = identity.require()?;
    request.validate().map_err(Error::Validation)?;

    let id = add_to_library(&app_state.pool, owner, &request.manga_id, request.chapter).await?;

    Ok(Json(EntryIdResponse { id }))
}

#[tracing::instrument(name = "[GET] library/{manga_id}", skip_all, fields(manga_id = %manga_id))]
pub async fn show(
    Extension(identity): Extension<CurrentIdentity>,
    State(app_state): State<SharedAppState>,
    Path(manga_id): Path<String>,
) -> Result<Json<InLibraryResponse>, Error> {
    let owner = identity.require()?;

    let in_library = is_in_library(&app_state.pool, owner, &manga_id).await?;

    Ok(Json(InLibraryResponse { in_library }))
}

#[tracing::instrument(name = "[DELETE] library/{manga_id}", skip_all, fields(manga_id = %manga_id))]
pub async fn destroy(
    Extension(identity): Extension<CurrentIdentity>,
    State(app_state): State<SharedAppState>,
    Path(manga_id): Path<String>,
) -> Result<StatusCode, Error> {
    let owner = identity.require()?;

    remove_from_library(&app_state.pool, owner, &manga_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
