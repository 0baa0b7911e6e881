pub mod fan_art;
pub mod featured_work;
pub mod health;
pub mod profile;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /fanart                       list, create
/// /fanart/{id}                  get, patch, delete
/// /fanart/{id}/vote             vote
/// /featured-works               list, create
/// /featured-works/{id}          get, patch, delete
/// /profile                      get, put
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/fanart", fan_art::router())
        .nest("/featured-works", featured_work::router())
        .nest("/profile", profile::router())
}
