pub mod config;
pub mod db;
pub mod error;
pub mod geocode;
pub mod images;
pub mod models;
pub mod routes;
pub mod suggest;
pub mod view;

use std::sync::Arc;

use axum::{Router, routing::get};
use sqlx::SqlitePool;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use geocode::Geocode;
use images::ImageStore;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub geocoder: Arc<dyn Geocode>,
    pub images: Arc<dyn ImageStore>,
}

async fn health() -> &'static str {
    "ok"
}

/// Build the full Axum application router.
///
/// Caller is responsible for running database migrations on `pool`
/// beforehand. The geocoder and image store are injected so tests can
/// substitute in-process stubs for the hosted services.
pub fn build_app(
    pool: SqlitePool,
    geocoder: Arc<dyn Geocode>,
    images: Arc<dyn ImageStore>,
) -> Router {
    let state = AppState {
        db: pool,
        geocoder,
        images,
    };

    Router::new()
        .route("/health", get(health))
        .merge(routes::entries::router())
        .merge(routes::places::router())
        .merge(routes::images::router())
        .merge(routes::export::router())
        .layer(
            TraceLayer::new_for_http()
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
