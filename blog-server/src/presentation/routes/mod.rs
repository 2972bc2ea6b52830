use axum::{Json, Router, routing::get};
use serde::Serialize;

use super::AppState;

pub(crate) mod posts;
pub(crate) mod taxonomy;

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .nest("/api", posts::router().merge(taxonomy::router()))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
    version: &'static str,
}

// Не зависит от доступности CMS.
async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
