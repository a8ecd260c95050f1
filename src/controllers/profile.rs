use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    auth::CurrentIdentity,
    controllers::EntryIdResponse,
    db::profiles::{get_profile, is_admin, upsert_profile},
    error::Error,
    model::UserProfile,
    state::SharedAppState,
};

#[derive(Deserialize, Serialize, Debug, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProfileRequest {
    #[validate(length(min = 1, max = 64))]
    pub display_name: Option<String>,
    #[validate(url, length(max = 2048))]
    pub avatar: Option<String>,
}

#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct IsAdminResponse {
    pub is_admin: bool,
}

/// The caller's profile, or `null` when anonymous or not yet created.
#[tracing::instrument(name = "[GET] profile", skip_all)]
pub async fn show(
    Extension(identity): Extension<CurrentIdentity>,
    State(app_state): State<SharedAppState>,
) -> Result<Json<Option<UserProfile>>, Error> {
    let Some(owner) = identity.get() else {
        return Ok(Json(None));
    };

    let profile = get_profile(&app_state.pool, owner.subject()).await?;

    Ok(Json(profile))
}

#[tracing::instrument(name = "[PUT] profile", skip_all)]
pub async fn update(
    Extension(identity): Extension<CurrentIdentity>,
    State(app_state): State<SharedAppState>,
    Json(request): Json<UpsertProfileRequest>,
) -> Result<Json<EntryIdResponse>, Error> {
    let owner = identity.require()?;
    request.validate().map_err(Error::Validation)?;

    let id = upsert_profile(
        &app_state.pool,
        owner,
        request.display_name.as_deref(),
        request.avatar.as_deref(),
    )
    .await?;

    Ok(Json(EntryIdResponse { id }))
}

#[tracing::instrument(name = "[GET] profile/admin", skip_all)]
pub async fn admin(
    Extension(identity): Extension<CurrentIdentity>,
    State(app_state): State<SharedAppState>,
) -> Result<Json<IsAdminResponse>, Error> {
    let admin = match identity.get() {
        Some(owner) => is_admin(&app_state.pool, owner).await?,
        None => false,
    };

    Ok(Json(IsAdminResponse { is_admin: admin }))
}
