pub mod config;
pub mod error;
pub mod state;
pub mod logs;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::logs::{LogFileNaming, LogStore};
use crate::state::{AppState, SharedState};

pub fn build_app(config: Config) -> Router {
    let naming = LogFileNaming::new(config.file_prefix.clone(), config.file_suffix.clone());
    let store = LogStore::new(config.logs_dir.clone(), naming);

    if !store.dir().is_dir() {
        tracing::warn!(
            "Logs directory {} does not exist yet; requests will return 404 until it does",
            store.dir().display()
        );
    }

    let routes = routes::log_routes(&config.route);

    let state: SharedState = Arc::new(AppState { store });

    // Every response, errors included, is readable cross-origin
    let headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type, Authorization"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ));

    Router::new()
        .merge(routes)
        .route("/health", axum::routing::get(health))
        .layer(headers)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
