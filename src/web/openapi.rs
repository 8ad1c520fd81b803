//! OpenAPI document for the catalog Web API.

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::web::dto::{
    CreateNodeRequest, HealthResponse, NodeResponse, ResponseMeta, TreeNodeResponse,
    UpdateNodeRequest,
};

/// OpenAPI documentation for every route.
///
/// Success bodies are wrapped in `{success, data, meta?}`; failures are
/// `{success: false, error, code}`.
#[derive(OpenApi)]
#[openapi(
    info(description = "Virtual file/folder catalog API"),
    paths(
        crate::web::handlers::health::health_check,
        crate::web::handlers::node::list_nodes,
        crate::web::handlers::node::get_folder_tree,
        crate::web::handlers::node::get_node,
        crate::web::handlers::node::get_children,
        crate::web::handlers::node::search_nodes,
        crate::web::handlers::node::create_node,
        crate::web::handlers::node::update_node,
        crate::web::handlers::node::delete_node,
    ),
    components(schemas(
        NodeResponse,
        TreeNodeResponse,
        CreateNodeRequest,
        UpdateNodeRequest,
        ResponseMeta,
        HealthResponse,
    )),
    tags(
        (name = "nodes", description = "File and folder nodes"),
        (name = "folders", description = "Folder tree"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

/// Create a router serving the document at `/api-docs/openapi.json`.
pub fn create_openapi_router() -> Router {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
