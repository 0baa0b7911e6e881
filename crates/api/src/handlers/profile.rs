use axum::extract::State;
use axum::Json;
use fansite_db::models::profile::Profile;
use fansite_db::repositories::ProfileRepo;
use serde_json::{Map, Value};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::admin::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/profile
pub async fn get(State(state): State<AppState>) -> AppResult<Json<DataResponse<Profile>>> {
    let profile = ProfileRepo::get(state.store.as_ref()).await?;
    Ok(Json(DataResponse::new(profile)))
}

/// PUT /api/v1/profile
///
/// Partial update: only the fields present in the body change.
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    AppJson(patch): AppJson<Map<String, Value>>,
) -> AppResult<Json<DataResponse<Profile>>> {
    let profile = ProfileRepo::update(state.store.as_ref(), &patch).await?;
    Ok(Json(DataResponse::new(profile)))
}
