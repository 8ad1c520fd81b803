//! Catalog service.
//!
//! Business rules on top of a [`NodeGateway`]: tree assembly, pagination,
//! search normalization and structural checks for mutations.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use super::gateway::NodeGateway;
use super::policy::{CatalogPolicy, DeletePolicy, UpdateParentPolicy};
use super::repository::NodeRepository;
use super::tree::build_tree;
use super::types::{NewNode, Node, NodeTree, NodeType, NodeUpdate};
use super::{MAX_NAME_LENGTH, ROOT_PARENT};
use crate::db::Database;
use crate::{CatalogError, Result};

/// One page of a child listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildrenPage {
    /// Nodes on this page, folder-first then by name.
    pub nodes: Vec<Node>,
    /// Number of children under the parent, counted independently.
    pub total: u64,
    /// `offset + nodes.len() < total`.
    pub has_more: bool,
    /// Effective page size.
    pub limit: u32,
    /// Effective offset.
    pub offset: u32,
}

/// Catalog service.
#[derive(Clone)]
pub struct CatalogService {
    gateway: Arc<dyn NodeGateway>,
    policy: CatalogPolicy,
}

impl CatalogService {
    /// Create a service over any gateway with the default policy.
    pub fn new(gateway: Arc<dyn NodeGateway>) -> Self {
        Self {
            gateway,
            policy: CatalogPolicy::default(),
        }
    }

    /// Create a service backed by the SQLite repository.
    pub fn from_database(db: &Database) -> Self {
        Self::new(Arc::new(NodeRepository::new(db.pool())))
    }

    /// Replace the policy.
    pub fn with_policy(mut self, policy: CatalogPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Current policy.
    pub fn policy(&self) -> &CatalogPolicy {
        &self.policy
    }

    /// All nodes, folder-first then by name.
    pub async fn get_all(&self) -> Result<Vec<Node>> {
        let nodes = self.gateway.find_all().await?;
        debug!(count = nodes.len(), "Listed all nodes");
        Ok(nodes)
    }

    /// Nested tree of FOLDER nodes. Files are not included.
    pub async fn get_folder_tree(&self) -> Result<Vec<NodeTree>> {
        let folders = self.gateway.find_folders().await?;
        build_tree(folders, self.policy.tree_mode)
    }

    /// A single node.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Node>> {
        self.gateway.find_by_id(id).await
    }

    /// Direct children of `parent_id`, one page.
    ///
    /// `None` and the `"root"` sentinel both mean the top level. `limit`
    /// defaults to the configured page size and is clamped to the maximum.
    /// The page and the total come from two separate queries, so under
    /// concurrent writes they may disagree.
    pub async fn get_children(
        &self,
        parent_id: Option<&str>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<ChildrenPage> {
        let parent_id = parent_id.filter(|id| *id != ROOT_PARENT);
        let limit = limit
            .unwrap_or(self.policy.children_page_size)
            .min(self.policy.max_page_size);
        let offset = offset.unwrap_or(0);

        let (nodes, total) = tokio::try_join!(
            self.gateway.find_by_parent_id(parent_id, limit, offset),
            self.gateway.count_by_parent_id(parent_id),
        )?;

        let has_more = u64::from(offset) + (nodes.len() as u64) < total;
        debug!(parent_id = ?parent_id, total, returned = nodes.len(), "Listed children");

        Ok(ChildrenPage {
            nodes,
            total,
            has_more,
            limit,
            offset,
        })
    }

    /// Case-insensitive substring search on names.
    ///
    /// The query is trimmed; a blank query returns nothing without a
    /// storage call.
    pub async fn search(&self, query: &str, limit: Option<u32>) -> Result<Vec<Node>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let limit = limit
            .unwrap_or(self.policy.search_limit)
            .min(self.policy.max_page_size);

        let nodes = self.gateway.search(query, limit).await?;
        debug!(query, count = nodes.len(), "Searched nodes");
        Ok(nodes)
    }

    /// Create a node.
    ///
    /// A given parent must exist and be a folder.
    pub async fn create_node(&self, new_node: &NewNode) -> Result<Node> {
        validate_name(&new_node.name)?;
        validate_size(new_node.size)?;

        if let Some(ref parent_id) = new_node.parent_id {
            self.require_folder(parent_id).await?;
        }

        let node = self.gateway.create(new_node).await?;
        info!(
            node_id = %node.id,
            parent_id = ?node.parent_id,
            node_type = %node.node_type,
            "Created node"
        );
        Ok(node)
    }

    /// Apply a partial update to an existing node.
    pub async fn update_node(&self, id: &str, update: &NodeUpdate) -> Result<Node> {
        let existing = self
            .gateway
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound("Node".to_string()))?;

        if let Some(ref name) = update.name {
            validate_name(name)?;
        }
        if let Some(size) = update.size {
            validate_size(size)?;
        }

        if self.policy.update_parent == UpdateParentPolicy::Validate {
            self.check_update_structure(&existing, update).await?;
        }

        let node = self
            .gateway
            .update(id, update)
            .await?
            .ok_or_else(|| CatalogError::NotFound("Node".to_string()))?;

        info!(node_id = %node.id, "Updated node");
        Ok(node)
    }

    /// Delete a node.
    ///
    /// Under [`DeletePolicy::Orphan`] children keep their now dangling
    /// `parent_id`; under [`DeletePolicy::Cascade`] all descendants are
    /// removed first, deepest level first.
    pub async fn delete_node(&self, id: &str) -> Result<()> {
        if self.gateway.find_by_id(id).await?.is_none() {
            return Err(CatalogError::NotFound("Node".to_string()));
        }

        if self.policy.delete == DeletePolicy::Cascade {
            let descendants = self.collect_descendants(id).await?;
            for descendant in descendants.iter().rev() {
                self.gateway.delete(descendant).await?;
            }
            if !descendants.is_empty() {
                info!(node_id = %id, removed = descendants.len(), "Deleted descendants");
            }
        }

        if !self.gateway.delete(id).await? {
            return Err(CatalogError::NotFound("Node".to_string()));
        }

        info!(node_id = %id, "Deleted node");
        Ok(())
    }

    async fn require_folder(&self, parent_id: &str) -> Result<Node> {
        let parent = self
            .gateway
            .find_by_id(parent_id)
            .await?
            .ok_or_else(|| CatalogError::NotFound("Parent node".to_string()))?;

        if !parent.is_folder() {
            return Err(CatalogError::InvalidStructure(
                "Parent must be a folder".to_string(),
            ));
        }

        Ok(parent)
    }

    async fn check_update_structure(&self, existing: &Node, update: &NodeUpdate) -> Result<()> {
        if let Some(Some(ref new_parent)) = update.parent_id {
            if existing.parent_id.as_deref() != Some(new_parent.as_str()) {
                if *new_parent == existing.id {
                    return Err(CatalogError::InvalidStructure(
                        "A node cannot be its own parent".to_string(),
                    ));
                }

                let parent = self.require_folder(new_parent).await?;
                if self.is_ancestor(&existing.id, &parent).await? {
                    return Err(CatalogError::InvalidStructure(
                        "Cannot move a node into its own descendant".to_string(),
                    ));
                }
            }
        }

        if update.node_type == Some(NodeType::File)
            && existing.is_folder()
            && self.gateway.count_by_parent_id(Some(existing.id.as_str())).await? > 0
        {
            return Err(CatalogError::InvalidStructure(
                "A folder with children cannot become a file".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether `ancestor_id` appears on the parent chain starting at `node`.
    async fn is_ancestor(&self, ancestor_id: &str, node: &Node) -> Result<bool> {
        let mut seen = HashSet::new();
        let mut current = node.parent_id.clone();

        while let Some(id) = current {
            if id == ancestor_id {
                return Ok(true);
            }
            if !seen.insert(id.clone()) {
                break;
            }
            current = match self.gateway.find_by_id(&id).await? {
                Some(parent) => parent.parent_id,
                None => None,
            };
        }

        Ok(false)
    }

    /// Every descendant of `id`, breadth-first (parents before children).
    async fn collect_descendants(&self, id: &str) -> Result<Vec<String>> {
        let page_size = self.policy.max_page_size.max(1);
        let mut seen: HashSet<String> = HashSet::from([id.to_string()]);
        let mut ordered = Vec::new();
        let mut cursor = 0;
        let mut current = id.to_string();

        loop {
            let mut offset = 0;
            loop {
                let page = self
                    .gateway
                    .find_by_parent_id(Some(current.as_str()), page_size, offset)
                    .await?;
                let fetched = page.len();
                for child in page {
                    if seen.insert(child.id.clone()) {
                        ordered.push(child.id);
                    }
                }
                if fetched < page_size as usize {
                    break;
                }
                offset += page_size;
            }

            match ordered.get(cursor) {
                Some(next) => {
                    current = next.clone();
                    cursor += 1;
                }
                None => break,
            }
        }

        Ok(ordered)
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CatalogError::InvalidInput("Name is required".to_string()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(CatalogError::InvalidInput(format!(
            "Name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    if name.chars().any(char::is_control) {
        return Err(CatalogError::InvalidInput(
            "Name must not contain control characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_size(size: Option<i64>) -> Result<()> {
    match size {
        Some(size) if size < 0 => Err(CatalogError::InvalidInput(
            "Size must not be negative".to_string(),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::order::{fold_case, sort_nodes};
    use crate::node::testing::sample_node;
    use crate::node::TreeMode;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory gateway that counts every call.
    #[derive(Default)]
    struct MemoryGateway {
        nodes: Mutex<Vec<Node>>,
        calls: AtomicUsize,
        next_id: AtomicUsize,
    }

    impl MemoryGateway {
        fn with_nodes(nodes: Vec<Node>) -> Self {
            Self {
                nodes: Mutex::new(nodes),
                ..Default::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn touch(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }

        fn ids(&self) -> Vec<String> {
            let mut ids: Vec<_> = self.nodes.lock().unwrap().iter().map(|n| n.id.clone()).collect();
            ids.sort();
            ids
        }
    }

    #[async_trait]
    impl NodeGateway for MemoryGateway {
        async fn find_all(&self) -> Result<Vec<Node>> {
            self.touch();
            let mut nodes = self.nodes.lock().unwrap().clone();
            sort_nodes(&mut nodes);
            Ok(nodes)
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<Node>> {
            self.touch();
            Ok(self.nodes.lock().unwrap().iter().find(|n| n.id == id).cloned())
        }

        async fn find_by_parent_id(
            &self,
            parent_id: Option<&str>,
            limit: u32,
            offset: u32,
        ) -> Result<Vec<Node>> {
            self.touch();
            let mut nodes: Vec<Node> = self
                .nodes
                .lock()
                .unwrap()
                .iter()
                .filter(|n| n.parent_id.as_deref() == parent_id)
                .cloned()
                .collect();
            sort_nodes(&mut nodes);
            Ok(nodes
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect())
        }

        async fn find_folders(&self) -> Result<Vec<Node>> {
            self.touch();
            Ok(self
                .nodes
                .lock()
                .unwrap()
                .iter()
                .filter(|n| n.is_folder())
                .cloned()
                .collect())
        }

        async fn search(&self, text: &str, limit: u32) -> Result<Vec<Node>> {
            self.touch();
            let needle = fold_case(text);
            let mut nodes: Vec<Node> = self
                .nodes
                .lock()
                .unwrap()
                .iter()
                .filter(|n| fold_case(&n.name).contains(&needle))
                .cloned()
                .collect();
            sort_nodes(&mut nodes);
            nodes.truncate(limit as usize);
            Ok(nodes)
        }

        async fn count_by_parent_id(&self, parent_id: Option<&str>) -> Result<u64> {
            self.touch();
            Ok(self
                .nodes
                .lock()
                .unwrap()
                .iter()
                .filter(|n| n.parent_id.as_deref() == parent_id)
                .count() as u64)
        }

        async fn create(&self, node: &NewNode) -> Result<Node> {
            self.touch();
            let id = format!("gen-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
            let mut created = sample_node(&id, &node.name, node.node_type);
            created.parent_id = node.parent_id.clone();
            created.size = node.size;
            created.mime_type = node.mime_type.clone();
            self.nodes.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn update(&self, id: &str, update: &NodeUpdate) -> Result<Option<Node>> {
            self.touch();
            let mut nodes = self.nodes.lock().unwrap();
            Ok(nodes.iter_mut().find(|n| n.id == id).map(|node| {
                update.apply_to(node);
                node.clone()
            }))
        }

        async fn delete(&self, id: &str) -> Result<bool> {
            self.touch();
            let mut nodes = self.nodes.lock().unwrap();
            let before = nodes.len();
            nodes.retain(|n| n.id != id);
            Ok(nodes.len() < before)
        }
    }

    fn node(id: &str, name: &str, node_type: NodeType, parent: Option<&str>) -> Node {
        let mut node = sample_node(id, name, node_type);
        node.parent_id = parent.map(str::to_string);
        node
    }

    fn service(nodes: Vec<Node>) -> (Arc<MemoryGateway>, CatalogService) {
        let gateway = Arc::new(MemoryGateway::with_nodes(nodes));
        let service = CatalogService::new(gateway.clone());
        (gateway, service)
    }

    /// Documents/{Work/{2024}, notes.txt}, Projects, and a loose file.
    fn sample_catalog() -> Vec<Node> {
        vec![
            node("docs", "Documents", NodeType::Folder, None),
            node("work", "Work", NodeType::Folder, Some("docs")),
            node("y2024", "2024", NodeType::Folder, Some("work")),
            node("notes", "notes.txt", NodeType::File, Some("docs")),
            node("proj", "Projects", NodeType::Folder, None),
            node("readme", "README.md", NodeType::File, None),
        ]
    }

    #[tokio::test]
    async fn test_folder_tree_excludes_files() {
        let (_, service) = service(vec![
            node("1", "B", NodeType::Folder, None),
            node("2", "A", NodeType::Folder, None),
            node("3", "x", NodeType::File, Some("1")),
        ]);

        let tree = service.get_folder_tree().await.unwrap();

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].node.id, "2");
        assert_eq!(tree[0].node.name, "A");
        assert!(tree[0].children.is_empty());
        assert_eq!(tree[1].node.id, "1");
        assert!(tree[1].children.is_empty());
    }

    #[tokio::test]
    async fn test_folder_tree_strict_mode_reports_dangling() {
        let (_, service) = service(vec![
            node("1", "A", NodeType::Folder, None),
            node("2", "lost", NodeType::Folder, Some("gone")),
        ]);

        let lenient = service.get_folder_tree().await.unwrap();
        assert_eq!(lenient.len(), 1);

        let strict = service
            .clone()
            .with_policy(CatalogPolicy::default().with_tree_mode(TreeMode::Strict));
        assert!(matches!(
            strict.get_folder_tree().await,
            Err(CatalogError::InvalidStructure(_))
        ));
    }

    #[tokio::test]
    async fn test_get_all_orders_folders_first() {
        let (_, service) = service(sample_catalog());

        let nodes = service.get_all().await.unwrap();
        let names: Vec<_> = nodes.iter().map(|n| n.name.as_str()).collect();

        assert_eq!(
            names,
            vec!["2024", "Documents", "Projects", "Work", "notes.txt", "README.md"]
        );
    }

    #[tokio::test]
    async fn test_get_children_first_page_of_roots() {
        let (_, service) = service(vec![
            node("1", "a", NodeType::Folder, None),
            node("2", "b", NodeType::Folder, None),
            node("3", "c", NodeType::File, None),
        ]);

        let page = service.get_children(None, Some(1), Some(0)).await.unwrap();

        assert_eq!(page.nodes.len(), 1);
        assert_eq!(page.total, 3);
        assert!(page.has_more);
        assert_eq!(page.limit, 1);
        assert_eq!(page.offset, 0);
    }

    #[tokio::test]
    async fn test_get_children_has_more_invariant() {
        let (_, service) = service(sample_catalog());

        for limit in 0..4 {
            for offset in 0..5 {
                let page = service
                    .get_children(None, Some(limit), Some(offset))
                    .await
                    .unwrap();
                assert_eq!(
                    page.has_more,
                    u64::from(offset) + (page.nodes.len() as u64) < page.total
                );
            }
        }
    }

    #[tokio::test]
    async fn test_get_children_root_sentinel_and_defaults() {
        let (_, service) = service(sample_catalog());

        let page = service.get_children(Some("root"), None, None).await.unwrap();
        let names: Vec<_> = page.nodes.iter().map(|n| n.name.as_str()).collect();

        assert_eq!(names, vec!["Documents", "Projects", "README.md"]);
        assert_eq!(page.limit, crate::node::DEFAULT_CHILDREN_LIMIT);
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn test_get_children_clamps_limit() {
        let (_, service) = service(sample_catalog());

        let page = service
            .get_children(Some("docs"), Some(u32::MAX), None)
            .await
            .unwrap();

        assert_eq!(page.limit, crate::node::MAX_PAGE_SIZE);
        assert_eq!(page.total, 2);
        assert_eq!(page.nodes[0].name, "Work");
    }

    #[tokio::test]
    async fn test_whitespace_search_does_not_touch_storage() {
        let (gateway, service) = service(sample_catalog());

        let results = service.search("   ", None).await.unwrap();

        assert!(results.is_empty());
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_search_trims_and_matches_case_insensitively() {
        let (_, service) = service(sample_catalog());

        let results = service.search("  DOC ", None).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "docs");
    }

    #[tokio::test]
    async fn test_create_under_missing_parent_is_not_found() {
        let (gateway, service) = service(sample_catalog());

        let result = service
            .create_node(&NewNode::file("a.txt").with_parent("missing"))
            .await;

        assert!(matches!(result, Err(CatalogError::NotFound(_))));
        assert_eq!(gateway.ids().len(), 6);
    }

    #[tokio::test]
    async fn test_create_under_file_is_invalid_structure() {
        let (_, service) = service(sample_catalog());

        let result = service
            .create_node(&NewNode::file("a.txt").with_parent("notes"))
            .await;

        assert!(matches!(result, Err(CatalogError::InvalidStructure(_))));
    }

    #[tokio::test]
    async fn test_create_under_folder_and_at_root() {
        let (_, service) = service(sample_catalog());

        let child = service
            .create_node(&NewNode::file("a.txt").with_parent("docs").with_size(3))
            .await
            .unwrap();
        assert_eq!(child.parent_id.as_deref(), Some("docs"));
        assert_eq!(child.size, Some(3));

        let root = service.create_node(&NewNode::folder("Music")).await.unwrap();
        assert!(root.is_root());
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input() {
        let (_, service) = service(Vec::new());

        for bad in [
            NewNode::folder("   "),
            NewNode::folder("a\nb"),
            NewNode::folder("x".repeat(MAX_NAME_LENGTH + 1)),
            NewNode::file("neg").with_size(-1),
        ] {
            assert!(matches!(
                service.create_node(&bad).await,
                Err(CatalogError::InvalidInput(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (gateway, service) = service(sample_catalog());
        let before = gateway.ids();

        let result = service
            .update_node("missing", &NodeUpdate::new().name("x"))
            .await;

        assert!(matches!(result, Err(CatalogError::NotFound(_))));
        assert_eq!(gateway.ids(), before);
    }

    #[tokio::test]
    async fn test_update_unchecked_allows_any_parent() {
        let (_, service) = service(sample_catalog());

        let updated = service
            .update_node("proj", &NodeUpdate::new().parent_id(Some("notes")))
            .await
            .unwrap();

        assert_eq!(updated.parent_id.as_deref(), Some("notes"));
    }

    #[tokio::test]
    async fn test_update_validate_rejects_bad_parents() {
        let (_, service) = service(sample_catalog());
        let service = service.with_policy(
            CatalogPolicy::default().with_update_parent(UpdateParentPolicy::Validate),
        );

        let cases = [
            ("proj", "notes"),
            ("docs", "docs"),
            ("docs", "y2024"),
        ];
        for (id, parent) in cases {
            let result = service
                .update_node(id, &NodeUpdate::new().parent_id(Some(parent)))
                .await;
            assert!(
                matches!(result, Err(CatalogError::InvalidStructure(_))),
                "{id} -> {parent}: {result:?}"
            );
        }

        let missing = service
            .update_node("proj", &NodeUpdate::new().parent_id(Some("nope")))
            .await;
        assert!(matches!(missing, Err(CatalogError::NotFound(_))));

        let moved = service
            .update_node("proj", &NodeUpdate::new().parent_id(Some("work")))
            .await
            .unwrap();
        assert_eq!(moved.parent_id.as_deref(), Some("work"));
    }

    #[tokio::test]
    async fn test_update_validate_folder_with_children_stays_folder() {
        let (_, service) = service(sample_catalog());
        let service = service.with_policy(
            CatalogPolicy::default().with_update_parent(UpdateParentPolicy::Validate),
        );

        let result = service
            .update_node("work", &NodeUpdate::new().node_type(NodeType::File))
            .await;
        assert!(matches!(result, Err(CatalogError::InvalidStructure(_))));

        let empty = service
            .update_node("proj", &NodeUpdate::new().node_type(NodeType::File))
            .await
            .unwrap();
        assert_eq!(empty.node_type, NodeType::File);
    }

    #[tokio::test]
    async fn test_update_clears_nullable_fields() {
        let (_, service) = service(vec![{
            let mut n = node("f", "a.txt", NodeType::File, None);
            n.size = Some(10);
            n.mime_type = Some("text/plain".to_string());
            n
        }]);

        let updated = service
            .update_node("f", &NodeUpdate::new().size(None).mime_type(None::<String>))
            .await
            .unwrap();

        assert!(updated.size.is_none());
        assert!(updated.mime_type.is_none());
        assert_eq!(updated.name, "a.txt");
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (gateway, service) = service(sample_catalog());

        assert!(matches!(
            service.delete_node("missing").await,
            Err(CatalogError::NotFound(_))
        ));
        assert_eq!(gateway.ids().len(), 6);
    }

    #[tokio::test]
    async fn test_delete_orphans_children_by_default() {
        let (gateway, service) = service(sample_catalog());

        service.delete_node("docs").await.unwrap();

        let ids = gateway.ids();
        assert!(!ids.contains(&"docs".to_string()));
        assert!(ids.contains(&"work".to_string()));
        assert!(ids.contains(&"notes".to_string()));

        // Orphaned folders fall out of the tree.
        let tree = service.get_folder_tree().await.unwrap();
        let names: Vec<_> = tree.iter().map(|t| t.node.name.as_str()).collect();
        assert_eq!(names, vec!["Projects"]);
    }

    #[tokio::test]
    async fn test_delete_cascade_removes_descendants() {
        let (gateway, service) = service(sample_catalog());
        let service =
            service.with_policy(CatalogPolicy::default().with_delete(DeletePolicy::Cascade));

        service.delete_node("docs").await.unwrap();

        assert_eq!(gateway.ids(), vec!["proj", "readme"]);
    }

    #[tokio::test]
    async fn test_delete_cascade_pages_through_children() {
        let mut nodes = vec![node("top", "top", NodeType::Folder, None)];
        for i in 0..7 {
            nodes.push(node(&format!("c{i}"), &format!("c{i}"), NodeType::File, Some("top")));
        }
        let (gateway, service) = service(nodes);
        let policy = CatalogPolicy {
            max_page_size: 3,
            ..CatalogPolicy::default().with_delete(DeletePolicy::Cascade)
        };
        let service = service.with_policy(policy);

        service.delete_node("top").await.unwrap();

        assert!(gateway.ids().is_empty());
    }
}
