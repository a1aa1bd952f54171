use std::sync::Arc;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    middleware,
    response::Html,
    routing::{delete, get, post, put},
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{AppState, templates};

mod auth;
mod catalog;
mod files;
mod media;
mod titles;
mod updates;

// Above the largest class ceiling; per-class limits do the real rejecting.
const BODY_LIMIT: usize = 32 * 1024 * 1024;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/titles", get(titles::list).post(titles::create))
        .route("/titles/{id}/usage", get(titles::usage))
        .route("/titles/{id}/profile", get(titles::get_profile).put(titles::put_profile))
        .route("/titles/{id}/artworks", get(media::list_artworks).post(media::upload_artwork))
        .route("/artworks/{id}", delete(media::delete_artwork))
        .route("/artworks/{id}/status", post(media::artwork_status))
        .route("/titles/{id}/captions", get(media::list_captions).post(media::upload_caption))
        .route("/captions/{id}", delete(media::delete_caption))
        .route("/titles/{id}/documents", get(media::list_documents).post(media::upload_document))
        .route("/documents/{id}", delete(media::delete_document))
        .route("/documents/{id}/status", post(media::document_status))
        .route("/titles/{id}/avails", get(catalog::list_avails).post(catalog::create_avail))
        .route("/avails/{id}", put(catalog::update_avail).delete(catalog::delete_avail))
        .route("/titles/{id}/cast", get(catalog::list_cast).post(catalog::create_cast))
        .route("/cast/{id}", put(catalog::update_cast).delete(catalog::delete_cast))
        .route("/titles/{id}/crew", get(catalog::list_crew).post(catalog::create_crew))
        .route("/crew/{id}", put(catalog::update_crew).delete(catalog::delete_crew))
        .route(
            "/titles/{id}/festivals",
            get(catalog::list_festivals).post(catalog::create_festival),
        )
        .route("/festivals/{id}", put(catalog::update_festival).delete(catalog::delete_festival))
        .route(
            "/titles/{id}/licenses",
            get(catalog::list_licenses).post(catalog::create_license),
        )
        .route("/licenses/{id}", put(catalog::update_license).delete(catalog::delete_license))
        .route("/updates", get(updates::list))
        .route("/file/{*key}", get(files::fetch));

    Router::new()
        .route("/", get(index))
        .route("/login", get(auth::login_page).post(auth::login))
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(state.clone(), auth::require_access))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(templates::index_page())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}
