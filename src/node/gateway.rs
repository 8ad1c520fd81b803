//! Storage gateway contract for catalog nodes.
//!
//! The catalog service decides *what* to ask for (filters, ordering,
//! pagination); a gateway only executes equality/substring filters, sorting
//! and limit/offset against its backing store.

use async_trait::async_trait;

use super::types::{NewNode, Node, NodeUpdate};
use crate::Result;

/// Persistence operations the catalog service depends on.
///
/// Listing operations return nodes folder-first, then by name, except
/// [`find_folders`](NodeGateway::find_folders) which orders by name only.
#[async_trait]
pub trait NodeGateway: Send + Sync {
    /// All nodes.
    async fn find_all(&self) -> Result<Vec<Node>>;

    /// A single node by ID.
    async fn find_by_id(&self, id: &str) -> Result<Option<Node>>;

    /// Direct children of `parent_id` (`None` = root level), one page.
    async fn find_by_parent_id(
        &self,
        parent_id: Option<&str>,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Node>>;

    /// All FOLDER nodes.
    async fn find_folders(&self) -> Result<Vec<Node>>;

    /// Case-insensitive substring match on name, capped at `limit`.
    async fn search(&self, text: &str, limit: u32) -> Result<Vec<Node>>;

    /// Number of direct children of `parent_id` (`None` = root level).
    async fn count_by_parent_id(&self, parent_id: Option<&str>) -> Result<u64>;

    /// Insert a node; storage assigns `id`, `created_at` and `updated_at`.
    async fn create(&self, node: &NewNode) -> Result<Node>;

    /// Apply a partial update. Returns `None` when the node does not exist.
    async fn update(&self, id: &str, update: &NodeUpdate) -> Result<Option<Node>>;

    /// Delete a node. Returns `false` when the node does not exist.
    async fn delete(&self, id: &str) -> Result<bool>;
}
