pub mod submission_logs;

use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

pub fn log_routes(path: &str) -> Router<SharedState> {
    Router::new().route(
        path,
        get(submission_logs::query).options(submission_logs::preflight),
    )
}
