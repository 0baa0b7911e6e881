use axum::routing::{get, post};
use axum::Router;

use crate::handlers::fan_art;
use crate::state::AppState;

/// Routes mounted at `/fanart`.
///
/// ```text
/// GET    /            -> list (?activeOnly=true)
/// POST   /            -> create        (admin)
/// GET    /{id}        -> get_by_id
/// PATCH  /{id}        -> update        (admin)
/// DELETE /{id}        -> delete        (admin)
/// POST   /{id}/vote   -> vote
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fan_art::list).post(fan_art::create))
        .route(
            "/{id}",
            get(fan_art::get_by_id)
                .patch(fan_art::update)
                .delete(fan_art::delete),
        )
        .route("/{id}/vote", post(fan_art::vote))
}
