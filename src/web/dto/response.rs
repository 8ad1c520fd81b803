//! Response DTOs for Web API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::datetime::to_rfc3339;
use crate::node::{ChildrenPage, Node, NodeTree};

// ============================================================================
// Envelope
// ============================================================================

/// Uniform response envelope: `{success, data|error, message?, meta?}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// Response data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Informational message (delete confirmations).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Listing metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

impl<T> ApiResponse<T> {
    /// Create a success envelope.
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
            meta: None,
        }
    }

    /// Attach listing metadata.
    pub fn with_meta(mut self, meta: ResponseMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}

impl ApiResponse<()> {
    /// Create a success envelope carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: Some(message.into()),
            meta: None,
        }
    }
}

/// Listing metadata.
///
/// Child listings fill `total/limit/offset/hasMore`; searches fill
/// `query/count`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    /// Number of children under the parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Effective page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Effective offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Whether more children follow this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
    /// Normalized search query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Number of search hits returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl ResponseMeta {
    /// Metadata for a child listing page.
    pub fn page(page: &ChildrenPage) -> Self {
        Self {
            total: Some(page.total),
            limit: Some(page.limit),
            offset: Some(page.offset),
            has_more: Some(page.has_more),
            ..Default::default()
        }
    }

    /// Metadata for a search result.
    pub fn search(query: impl Into<String>, count: usize) -> Self {
        Self {
            query: Some(query.into()),
            count: Some(count),
            ..Default::default()
        }
    }
}

// ============================================================================
// Node DTOs
// ============================================================================

/// Node response.
///
/// `size` travels as a decimal string so values beyond 2^53 survive
/// JavaScript clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodeResponse {
    /// Node ID.
    pub id: String,
    /// Node name.
    pub name: String,
    /// `FILE` or `FOLDER`.
    #[serde(rename = "type")]
    pub node_type: String,
    /// Parent folder ID.
    pub parent_id: Option<String>,
    /// Size in bytes as a decimal string.
    pub size: Option<String>,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last update timestamp (RFC 3339).
    pub updated_at: String,
}

impl From<Node> for NodeResponse {
    fn from(node: Node) -> Self {
        Self {
            id: node.id,
            name: node.name,
            node_type: node.node_type.to_string(),
            parent_id: node.parent_id,
            size: node.size.map(|s| s.to_string()),
            mime_type: node.mime_type,
            created_at: to_rfc3339(&node.created_at),
            updated_at: to_rfc3339(&node.updated_at),
        }
    }
}

/// Folder-tree entry response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TreeNodeResponse {
    /// Node ID.
    pub id: String,
    /// Node name.
    pub name: String,
    /// Always `FOLDER` in the folder tree.
    #[serde(rename = "type")]
    pub node_type: String,
    /// Parent folder ID.
    pub parent_id: Option<String>,
    /// Size in bytes as a decimal string.
    pub size: Option<String>,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last update timestamp (RFC 3339).
    pub updated_at: String,
    /// Child folders, sorted by name.
    pub children: Vec<TreeNodeResponse>,
}

impl From<NodeTree> for TreeNodeResponse {
    fn from(tree: NodeTree) -> Self {
        let node = NodeResponse::from(tree.node);
        Self {
            id: node.id,
            name: node.name,
            node_type: node.node_type,
            parent_id: node.parent_id,
            size: node.size,
            mime_type: node.mime_type,
            created_at: node.created_at,
            updated_at: node.updated_at,
            children: tree.children.into_iter().map(Into::into).collect(),
        }
    }
}

/// Health check response (not wrapped in the envelope).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Server time (RFC 3339).
    pub timestamp: String,
}
