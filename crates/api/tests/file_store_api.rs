//! The API over a file-backed store keeps its data across restarts.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_app_with, get, post_json, put_json, test_config, vote_as};
use fansite_db::{create_store, StoreBackend};
use serde_json::json;

async fn file_app(dir: &std::path::Path) -> axum::Router {
    let backend = StoreBackend::File(dir.to_path_buf());
    let store = create_store(&backend, false).await.unwrap();
    let mut config = test_config();
    config.store = backend;
    build_app_with(store, config)
}

#[tokio::test]
async fn data_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    let app = file_app(dir.path()).await;
    let response = post_json(
        app.clone(),
        "/api/v1/fanart",
        json!({"image": "https://x/a.png", "creatorName": "Ann"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    vote_as(app.clone(), &id, "like", "visitor-1").await;
    put_json(app, "/api/v1/profile", json!({"name": "Hero"})).await;

    // Same directory, new store instance.
    let app = file_app(dir.path()).await;
    let art = body_json(get(app.clone(), &format!("/api/v1/fanart/{id}")).await).await;
    assert_eq!(art["data"]["likes"], 1);

    let repeat = body_json(vote_as(app.clone(), &id, "like", "visitor-1").await).await;
    assert_eq!(repeat["data"]["likes"], 1);
    assert_eq!(repeat["data"]["counted"], false);

    let profile = body_json(get(app.clone(), "/api/v1/profile").await).await;
    assert_eq!(profile["data"]["name"], "Hero");

    let health = body_json(get(app, "/health").await).await;
    assert_eq!(health["store"], "file");
}
