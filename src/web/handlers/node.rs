//! Node handlers for Web API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::node::ROOT_PARENT;
use crate::web::dto::{
    ApiQuery, ApiResponse, CreateNodeRequest, NodeResponse, PageQuery, ResponseMeta, SearchQuery,
    TreeNodeResponse, UpdateNodeRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::CatalogError;

/// GET /api/v1/nodes - List every node.
#[utoipa::path(
    get,
    path = "/api/v1/nodes",
    tag = "nodes",
    responses(
        (status = 200, description = "All nodes, folders first then by name", body = Vec<NodeResponse>),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list_nodes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<NodeResponse>>>, ApiError> {
    let nodes = state.catalog.get_all().await?;

    Ok(Json(ApiResponse::new(
        nodes.into_iter().map(NodeResponse::from).collect(),
    )))
}

/// GET /api/v1/folders/tree - Nested folder tree.
#[utoipa::path(
    get,
    path = "/api/v1/folders/tree",
    tag = "folders",
    responses(
        (status = 200, description = "Folder forest, every level sorted by name", body = Vec<TreeNodeResponse>),
        (status = 422, description = "Tree has unplaceable folders (strict tree mode)")
    )
)]
pub async fn get_folder_tree(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<TreeNodeResponse>>>, ApiError> {
    let tree = state.catalog.get_folder_tree().await?;

    Ok(Json(ApiResponse::new(
        tree.into_iter().map(TreeNodeResponse::from).collect(),
    )))
}

/// GET /api/v1/nodes/:id - Get a single node.
#[utoipa::path(
    get,
    path = "/api/v1/nodes/{id}",
    tag = "nodes",
    params(
        ("id" = String, Path, description = "Node ID")
    ),
    responses(
        (status = 200, description = "Node details", body = NodeResponse),
        (status = 404, description = "Node not found")
    )
)]
pub async fn get_node(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<NodeResponse>>, ApiError> {
    let node = state
        .catalog
        .get_by_id(&id)
        .await?
        .ok_or_else(|| CatalogError::NotFound("Node".to_string()))?;

    Ok(Json(ApiResponse::new(node.into())))
}

/// GET /api/v1/nodes/:id/children - One page of direct children.
///
/// The path segment `root` lists top-level nodes.
#[utoipa::path(
    get,
    path = "/api/v1/nodes/{id}/children",
    tag = "nodes",
    params(
        ("id" = String, Path, description = "Parent node ID, or `root`"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Children with total/limit/offset/hasMore meta", body = Vec<NodeResponse>),
        (status = 400, description = "Malformed limit or offset")
    )
)]
pub async fn get_children(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<ApiResponse<Vec<NodeResponse>>>, ApiError> {
    let parent_id = (id != ROOT_PARENT).then_some(id.as_str());
    let page = state
        .catalog
        .get_children(parent_id, query.limit, query.offset)
        .await?;

    let meta = ResponseMeta::page(&page);
    let nodes = page.nodes.into_iter().map(NodeResponse::from).collect();

    Ok(Json(ApiResponse::new(nodes).with_meta(meta)))
}

/// GET /api/v1/search - Case-insensitive name search.
#[utoipa::path(
    get,
    path = "/api/v1/search",
    tag = "nodes",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching nodes with query/count meta", body = Vec<NodeResponse>),
        (status = 400, description = "Malformed limit")
    )
)]
pub async fn search_nodes(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<NodeResponse>>>, ApiError> {
    let text = query.q.trim();
    let nodes = state.catalog.search(text, query.limit).await?;

    let meta = ResponseMeta::search(text, nodes.len());
    let nodes = nodes.into_iter().map(NodeResponse::from).collect();

    Ok(Json(ApiResponse::new(nodes).with_meta(meta)))
}

/// POST /api/v1/nodes - Create a node.
#[utoipa::path(
    post,
    path = "/api/v1/nodes",
    tag = "nodes",
    request_body = CreateNodeRequest,
    responses(
        (status = 201, description = "Node created", body = NodeResponse),
        (status = 400, description = "Missing name/type or invalid type"),
        (status = 404, description = "Parent node not found"),
        (status = 422, description = "Parent is not a folder")
    )
)]
pub async fn create_node(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateNodeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<NodeResponse>>), ApiError> {
    let new_node = req.into_new_node()?;
    let node = state.catalog.create_node(&new_node).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(node.into()))))
}

/// PUT /api/v1/nodes/:id - Partially update a node.
#[utoipa::path(
    put,
    path = "/api/v1/nodes/{id}",
    tag = "nodes",
    params(
        ("id" = String, Path, description = "Node ID")
    ),
    request_body = UpdateNodeRequest,
    responses(
        (status = 200, description = "Node updated", body = NodeResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Node not found"),
        (status = 422, description = "Structural check failed (validate policy)")
    )
)]
pub async fn update_node(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateNodeRequest>,
) -> Result<Json<ApiResponse<NodeResponse>>, ApiError> {
    let update = req.into_update()?;
    let node = state.catalog.update_node(&id, &update).await?;

    Ok(Json(ApiResponse::new(node.into())))
}

/// DELETE /api/v1/nodes/:id - Delete a node.
#[utoipa::path(
    delete,
    path = "/api/v1/nodes/{id}",
    tag = "nodes",
    params(
        ("id" = String, Path, description = "Node ID")
    ),
    responses(
        (status = 200, description = "Node deleted"),
        (status = 404, description = "Node not found")
    )
)]
pub async fn delete_node(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.catalog.delete_node(&id).await?;

    Ok(Json(ApiResponse::message("Node deleted successfully")))
}
