use axum::extract::DefaultBodyLimit;
use axum::{routing::get, routing::post, Router};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handler;

/// HTTP endpoint paths.
pub mod endpoints {
    pub const HEALTH: &str = "/v1/health";
    pub const INFO: &str = "/v1/info";
    pub const COMPARE: &str = "/v1/compare";
    pub const COMPARE_MAP: &str = "/v1/compare/map";
}

/// Build the axum router with all keggmap endpoints.
pub fn build_router(config: &ServerConfig) -> Router {
    Router::new()
        .route(endpoints::HEALTH, get(handler::health_handler))
        .route(endpoints::INFO, get(handler::info_handler))
        .route(endpoints::COMPARE, post(handler::compare_handler))
        .route(endpoints::COMPARE_MAP, post(handler::map_handler))
        .layer(DefaultBodyLimit::max(config.max_upload_size))
        .layer(TraceLayer::new_for_http())
}
