//! santia-api
//!
//! HTTP surface of the Santia intake backend: the intake & status
//! service, its Axum routes, error mapping, and runtime configuration.

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod state;

use state::AppState;

/// Build the application router.
pub fn app(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/api", get(routes::health::health_check))
        .route("/api/", get(routes::health::health_check))
        .route(
            "/api/status",
            get(routes::status::list_status_checks).post(routes::status::create_status_check),
        )
        .route("/api/intake", post(routes::intake::create_intake))
        .route("/api/intakes", get(routes::intake::list_intakes))
        .layer(
            ServiceBuilder::new()
                .layer(axum_mw::from_fn(middleware::audit::audit_log))
                .layer(cors),
        )
        .with_state(state)
}
