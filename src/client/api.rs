//! Catalog API access for client state.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::config::ClientConfig;
use crate::node::{CatalogService, ChildrenPage, NewNode, Node, NodeTree, NodeUpdate, ROOT_PARENT};
use crate::web::dto::{ApiResponse, NodeResponse, TreeNodeResponse};
use crate::{CatalogError, Result};

/// Catalog operations as seen by a client.
///
/// A failure envelope from the server surfaces as
/// [`CatalogError::Remote`] carrying the server's message.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// All nodes.
    async fn get_all_nodes(&self) -> Result<Vec<Node>>;

    /// Nested folder tree.
    async fn get_folder_tree(&self) -> Result<Vec<NodeTree>>;

    /// A single node.
    async fn get_node(&self, id: &str) -> Result<Node>;

    /// One page of direct children (`None` = top level).
    async fn get_children(
        &self,
        parent_id: Option<&str>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<ChildrenPage>;

    /// Name search.
    async fn search(&self, query: &str, limit: Option<u32>) -> Result<Vec<Node>>;

    /// Create a node.
    async fn create_node(&self, node: &NewNode) -> Result<Node>;

    /// Partially update a node.
    async fn update_node(&self, id: &str, update: &NodeUpdate) -> Result<Node>;

    /// Delete a node.
    async fn delete_node(&self, id: &str) -> Result<()>;
}

/// HTTP client for the catalog REST API.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    /// Create a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Self::with_base_url(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    /// Create a client for `base_url` (e.g. `http://host:3000/api/v1`).
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn node_url(&self, id: &str) -> String {
        self.url(&format!("/nodes/{}", urlencoding::encode(id)))
    }

    /// Decode an envelope, turning `success: false` into `Remote`.
    async fn envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<ApiResponse<T>> {
        let status = response.status();
        let envelope: ApiResponse<T> = response.json().await.map_err(|e| {
            CatalogError::Http(format!("unexpected response (status {}): {}", status, e))
        })?;

        if !envelope.success {
            let message = envelope
                .error
                .unwrap_or_else(|| format!("request failed with status {}", status));
            debug!(%status, %message, "Server returned failure envelope");
            return Err(CatalogError::Remote(message));
        }

        Ok(envelope)
    }

    async fn data<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        Self::envelope(response)
            .await?
            .data
            .ok_or_else(|| CatalogError::Remote("response carried no data".to_string()))
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn get_all_nodes(&self) -> Result<Vec<Node>> {
        let response = self.http.get(self.url("/nodes")).send().await?;
        let nodes: Vec<NodeResponse> = Self::data(response).await?;
        nodes.into_iter().map(into_node).collect()
    }

    async fn get_folder_tree(&self) -> Result<Vec<NodeTree>> {
        let response = self.http.get(self.url("/folders/tree")).send().await?;
        let tree: Vec<TreeNodeResponse> = Self::data(response).await?;
        tree.into_iter().map(into_tree).collect()
    }

    async fn get_node(&self, id: &str) -> Result<Node> {
        let response = self.http.get(self.node_url(id)).send().await?;
        into_node(Self::data(response).await?)
    }

    async fn get_children(
        &self,
        parent_id: Option<&str>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<ChildrenPage> {
        let url = format!("{}/children", self.node_url(parent_id.unwrap_or(ROOT_PARENT)));

        let mut query = Vec::new();
        if let Some(limit) = limit {
            query.push(("limit", limit));
        }
        if let Some(offset) = offset {
            query.push(("offset", offset));
        }

        let response = self.http.get(url).query(&query).send().await?;
        let envelope: ApiResponse<Vec<NodeResponse>> = Self::envelope(response).await?;

        let nodes = envelope
            .data
            .unwrap_or_default()
            .into_iter()
            .map(into_node)
            .collect::<Result<Vec<_>>>()?;
        let meta = envelope.meta.unwrap_or_default();
        let offset = meta.offset.unwrap_or(offset.unwrap_or(0));
        let total = meta
            .total
            .unwrap_or(u64::from(offset) + nodes.len() as u64);

        Ok(ChildrenPage {
            has_more: meta
                .has_more
                .unwrap_or(u64::from(offset) + (nodes.len() as u64) < total),
            limit: meta.limit.or(limit).unwrap_or(nodes.len() as u32),
            offset,
            total,
            nodes,
        })
    }

    async fn search(&self, query: &str, limit: Option<u32>) -> Result<Vec<Node>> {
        let mut request = self.http.get(self.url("/search")).query(&[("q", query)]);
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }

        let nodes: Vec<NodeResponse> = Self::data(request.send().await?).await?;
        nodes.into_iter().map(into_node).collect()
    }

    async fn create_node(&self, node: &NewNode) -> Result<Node> {
        let body = json!({
            "name": node.name,
            "type": node.node_type.as_str(),
            "parentId": node.parent_id,
            "size": node.size.map(|s| s.to_string()),
            "mimeType": node.mime_type,
        });

        let response = self.http.post(self.url("/nodes")).json(&body).send().await?;
        into_node(Self::data(response).await?)
    }

    async fn update_node(&self, id: &str, update: &NodeUpdate) -> Result<Node> {
        let response = self
            .http
            .put(self.node_url(id))
            .json(&update_body(update))
            .send()
            .await?;
        into_node(Self::data(response).await?)
    }

    async fn delete_node(&self, id: &str) -> Result<()> {
        let response = self.http.delete(self.node_url(id)).send().await?;
        Self::envelope::<Value>(response).await?;
        Ok(())
    }
}

/// In-process access, bypassing HTTP.
#[async_trait]
impl CatalogApi for CatalogService {
    async fn get_all_nodes(&self) -> Result<Vec<Node>> {
        self.get_all().await
    }

    async fn get_folder_tree(&self) -> Result<Vec<NodeTree>> {
        CatalogService::get_folder_tree(self).await
    }

    async fn get_node(&self, id: &str) -> Result<Node> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound("Node".to_string()))
    }

    async fn get_children(
        &self,
        parent_id: Option<&str>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<ChildrenPage> {
        CatalogService::get_children(self, parent_id, limit, offset).await
    }

    async fn search(&self, query: &str, limit: Option<u32>) -> Result<Vec<Node>> {
        CatalogService::search(self, query, limit).await
    }

    async fn create_node(&self, node: &NewNode) -> Result<Node> {
        CatalogService::create_node(self, node).await
    }

    async fn update_node(&self, id: &str, update: &NodeUpdate) -> Result<Node> {
        CatalogService::update_node(self, id, update).await
    }

    async fn delete_node(&self, id: &str) -> Result<()> {
        CatalogService::delete_node(self, id).await
    }
}

/// JSON body for a partial update; cleared fields are sent as `null`.
fn update_body(update: &NodeUpdate) -> Value {
    let mut body = Map::new();

    if let Some(ref name) = update.name {
        body.insert("name".to_string(), json!(name));
    }
    if let Some(node_type) = update.node_type {
        body.insert("type".to_string(), json!(node_type.as_str()));
    }
    if let Some(ref parent_id) = update.parent_id {
        body.insert("parentId".to_string(), json!(parent_id));
    }
    if let Some(size) = update.size {
        body.insert("size".to_string(), json!(size.map(|s| s.to_string())));
    }
    if let Some(ref mime_type) = update.mime_type {
        body.insert("mimeType".to_string(), json!(mime_type));
    }

    Value::Object(body)
}

fn into_node(response: NodeResponse) -> Result<Node> {
    let node_type = response
        .node_type
        .parse()
        .map_err(CatalogError::Remote)?;
    let size = response
        .size
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| CatalogError::Remote(format!("invalid size in response: {s}")))
        })
        .transpose()?;

    Ok(Node {
        id: response.id,
        name: response.name,
        node_type,
        parent_id: response.parent_id,
        size,
        mime_type: response.mime_type,
        created_at: response.created_at,
        updated_at: response.updated_at,
    })
}

fn into_tree(response: TreeNodeResponse) -> Result<NodeTree> {
    let children = response
        .children
        .into_iter()
        .map(into_tree)
        .collect::<Result<Vec<_>>>()?;

    let node = into_node(NodeResponse {
        id: response.id,
        name: response.name,
        node_type: response.node_type,
        parent_id: response.parent_id,
        size: response.size,
        mime_type: response.mime_type,
        created_at: response.created_at,
        updated_at: response.updated_at,
    })?;

    Ok(NodeTree { node, children })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeType;

    fn response(id: &str, node_type: &str, size: Option<&str>) -> NodeResponse {
        NodeResponse {
            id: id.to_string(),
            name: format!("name-{id}"),
            node_type: node_type.to_string(),
            parent_id: None,
            size: size.map(str::to_string),
            mime_type: None,
            created_at: "2024-01-15T10:30:00Z".to_string(),
            updated_at: "2024-01-15T10:30:00Z".to_string(),
        }
    }

    #[test]
    fn test_into_node_parses_size_and_type() {
        let node = into_node(response("1", "FILE", Some("9007199254740993"))).unwrap();
        assert_eq!(node.node_type, NodeType::File);
        assert_eq!(node.size, Some(9_007_199_254_740_993));
        assert!(node.created_at_datetime().is_some());
    }

    #[test]
    fn test_into_node_rejects_garbage() {
        assert!(matches!(
            into_node(response("1", "LINK", None)),
            Err(CatalogError::Remote(_))
        ));
        assert!(matches!(
            into_node(response("1", "FILE", Some("big"))),
            Err(CatalogError::Remote(_))
        ));
    }

    #[test]
    fn test_into_tree_recurses() {
        let leaf = response("2", "FOLDER", None);
        let tree = TreeNodeResponse {
            id: "1".to_string(),
            name: "root".to_string(),
            node_type: "FOLDER".to_string(),
            parent_id: None,
            size: None,
            mime_type: None,
            created_at: "2024-01-15T10:30:00Z".to_string(),
            updated_at: "2024-01-15T10:30:00Z".to_string(),
            children: vec![TreeNodeResponse {
                id: leaf.id,
                name: leaf.name,
                node_type: leaf.node_type,
                parent_id: Some("1".to_string()),
                size: None,
                mime_type: None,
                created_at: leaf.created_at,
                updated_at: leaf.updated_at,
                children: Vec::new(),
            }],
        };

        let tree = into_tree(tree).unwrap();
        assert_eq!(tree.count(), 2);
        assert_eq!(tree.children[0].node.parent_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_update_body_distinguishes_clear_from_absent() {
        let body = update_body(
            &NodeUpdate::new()
                .name("renamed")
                .size(None)
                .mime_type(Some("text/plain")),
        );

        assert_eq!(
            body,
            json!({"name": "renamed", "size": null, "mimeType": "text/plain"})
        );
        assert!(body.get("parentId").is_none());
    }

    #[test]
    fn test_http_client_trims_base_url() {
        let client =
            HttpCatalogClient::with_base_url("http://localhost:3000/api/v1/", Duration::from_secs(1))
                .unwrap();

        assert_eq!(client.base_url(), "http://localhost:3000/api/v1");
        assert_eq!(
            client.node_url("a b/c"),
            "http://localhost:3000/api/v1/nodes/a%20b%2Fc"
        );
    }
}
