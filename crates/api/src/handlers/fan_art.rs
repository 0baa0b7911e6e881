//! Handlers for the `/fanart` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fansite_core::error::CoreError;
use fansite_core::vote::{parse_choice, VoteType};
use fansite_db::models::fan_art::{CreateFanArt, FanArt};
use fansite_db::repositories::{FanArtRepo, Record, VoteLedger};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::middleware::admin::RequireAdmin;
use crate::middleware::visitor::VisitorToken;
use crate::query::ActiveOnlyParams;
use crate::response::{DataResponse, SuccessResponse};
use crate::state::AppState;

/// Body of `POST /fanart/{id}/vote`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    /// `like`, `dislike`, or `none` to retract (tokened votes only).
    pub vote_type: Option<String>,
    /// Visitor token when the client cannot set the header.
    pub visitor_id: Option<String>,
}

/// A fan-art entry after a vote, with the visitor's standing choice.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteView {
    #[serde(flatten)]
    pub fan_art: FanArt,
    pub user_vote: Option<VoteType>,
    /// Whether this request moved a counter.
    pub counted: bool,
}

/// GET /api/v1/fanart
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ActiveOnlyParams>,
) -> AppResult<Json<DataResponse<Vec<FanArt>>>> {
    let items = if params.active_only() {
        FanArtRepo::list_active(state.store.as_ref()).await?
    } else {
        FanArtRepo::list(state.store.as_ref()).await?
    };
    Ok(Json(DataResponse::new(items)))
}

/// POST /api/v1/fanart
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateFanArt>,
) -> AppResult<(StatusCode, Json<DataResponse<FanArt>>)> {
    let art = FanArtRepo::create(state.store.as_ref(), &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(art))))
}

/// GET /api/v1/fanart/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<FanArt>>> {
    let art = FanArtRepo::find_by_id(state.store.as_ref(), &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found(FanArt::ENTITY, id)))?;
    Ok(Json(DataResponse::new(art)))
}

/// PATCH /api/v1/fanart/{id}
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(patch): AppJson<Map<String, Value>>,
) -> AppResult<Json<DataResponse<FanArt>>> {
    let art = FanArtRepo::update(state.store.as_ref(), &id, &patch).await?;
    Ok(Json(DataResponse::new(art)))
}

/// DELETE /api/v1/fanart/{id}
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<SuccessResponse>> {
    if FanArtRepo::delete(state.store.as_ref(), &id).await? {
        Ok(Json(SuccessResponse::ok()))
    } else {
        Err(AppError::Core(CoreError::not_found(FanArt::ENTITY, id)))
    }
}

/// POST /api/v1/fanart/{id}/vote
///
/// The `X-Visitor-Token` header takes precedence over a `visitorId` body field.
pub async fn vote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    VisitorToken(header_token): VisitorToken,
    AppJson(body): AppJson<VoteRequest>,
) -> AppResult<Json<DataResponse<VoteView>>> {
    let visitor = header_token.or(body.visitor_id);
    let raw = body.vote_type.unwrap_or_default();
    let choice = match visitor {
        Some(_) => parse_choice(&raw)?,
        None => Some(VoteType::from_name(&raw)?),
    };

    let outcome = VoteLedger::vote(state.store.as_ref(), &id, choice, visitor.as_deref()).await?;
    Ok(Json(DataResponse::new(VoteView {
        fan_art: outcome.fan_art,
        user_vote: outcome.choice,
        counted: outcome.changed,
    })))
}
