//! Router configuration for Web API.

use axum::{
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::handlers::{
    create_node, delete_node, get_children, get_folder_tree, get_node, health_check, list_nodes,
    search_nodes, update_node, AppState,
};
use super::middleware::{always_ok, create_cors_layer};
use super::openapi::create_openapi_router;
use crate::config::{StatusMode, WebConfig};

/// Create the main API router.
///
/// Catalog routes live under `/api/v1`; `/health` and the OpenAPI document
/// sit at the top level. Unknown paths and unsupported methods get a
/// failure envelope.
pub fn create_router(app_state: Arc<AppState>, config: &WebConfig) -> Router {
    let api_routes = Router::new()
        .route(
            "/nodes",
            get(list_nodes)
                .post(create_node)
                .fallback(method_not_allowed),
        )
        .route(
            "/nodes/:id",
            get(get_node)
                .put(update_node)
                .delete(delete_node)
                .fallback(method_not_allowed),
        )
        .route(
            "/nodes/:id/children",
            get(get_children).fallback(method_not_allowed),
        )
        .route(
            "/folders/tree",
            get(get_folder_tree).fallback(method_not_allowed),
        )
        .route("/search", get(search_nodes).fallback(method_not_allowed));

    let router = Router::new()
        .nest("/api/v1", api_routes)
        .with_state(app_state)
        .merge(create_health_router())
        .merge(create_openapi_router())
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(&config.cors_origins))
                .layer(CompressionLayer::new()),
        );

    match config.status_mode {
        StatusMode::Strict => router,
        StatusMode::AlwaysOk => router.layer(middleware::map_response(always_ok)),
    }
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed("Method not allowed")
}
