use axum::routing::get;
use axum::Router;

use crate::handlers::featured_work;
use crate::state::AppState;

/// Routes mounted at `/featured-works`.
///
/// ```text
/// GET    /        -> list (?activeOnly=true)
/// POST   /        -> create     (admin)
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update     (admin)
/// DELETE /{id}    -> delete     (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(featured_work::list).post(featured_work::create))
        .route(
            "/{id}",
            get(featured_work::get_by_id)
                .patch(featured_work::update)
                .delete(featured_work::delete),
        )
}
