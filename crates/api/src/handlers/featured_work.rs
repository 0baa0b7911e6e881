//! Handlers for the `/featured-works` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fansite_core::error::CoreError;
use fansite_db::models::featured_work::{CreateFeaturedWork, FeaturedWork};
use fansite_db::repositories::{FeaturedWorkRepo, Record};
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::middleware::admin::RequireAdmin;
use crate::query::ActiveOnlyParams;
use crate::response::{DataResponse, SuccessResponse};
use crate::state::AppState;

/// GET /api/v1/featured-works
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ActiveOnlyParams>,
) -> AppResult<Json<DataResponse<Vec<FeaturedWork>>>> {
    let items = if params.active_only() {
        FeaturedWorkRepo::list_active(state.store.as_ref()).await?
    } else {
        FeaturedWorkRepo::list(state.store.as_ref()).await?
    };
    Ok(Json(DataResponse::new(items)))
}

/// POST /api/v1/featured-works
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateFeaturedWork>,
) -> AppResult<(StatusCode, Json<DataResponse<FeaturedWork>>)> {
    let work = FeaturedWorkRepo::create(state.store.as_ref(), &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(work))))
}

/// GET /api/v1/featured-works/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<FeaturedWork>>> {
    let work = FeaturedWorkRepo::find_by_id(state.store.as_ref(), &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(FeaturedWork::ENTITY, id)))?;
    Ok(Json(DataResponse::new(work)))
}

/// PATCH /api/v1/featured-works/{id}
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(patch): AppJson<Map<String, Value>>,
) -> AppResult<Json<DataResponse<FeaturedWork>>> {
    let work = FeaturedWorkRepo::update(state.store.as_ref(), &id, &patch).await?;
    Ok(Json(DataResponse::new(work)))
}

/// DELETE /api/v1/featured-works/{id}
///
/// Succeeds whether or not the work existed.
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<SuccessResponse>> {
    FeaturedWorkRepo::delete(state.store.as_ref(), &id).await?;
    Ok(Json(SuccessResponse::ok()))
}
