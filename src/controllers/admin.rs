use axum::{Extension, Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    auth::CurrentIdentity, db::profiles::promote_to_admin, error::Error, model::UserProfile,
    state::SharedAppState,
};

#[derive(Deserialize, Serialize, Debug, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PromoteRequest {
    #[validate(length(min = 1, max = 256))]
    pub user_id: String,
}

#[tracing::instrument(name = "[POST] admin/promote", skip_all, fields(target = %request.user_id))]
pub async fn promote(
    Extension(identity): Extension<CurrentIdentity>,
    State(app_state): State<SharedAppState>,
    Json(request): Json<PromoteRequest>,
) -> Result<Json<UserProfile>, Error> {
    let caller = identity.require()?;
    request.validate().map_err(Error::Validation)?;

    let profile = promote_to_admin(&app_state.pool, caller, &request.user_id).await?;

    Ok(Json(profile))
}
