//! Structural policies for the catalog service.

use serde::Deserialize;

/// How folder-tree assembly treats nodes it cannot place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeMode {
    /// Silently drop nodes whose parent is missing or unreachable.
    #[default]
    Lenient,
    /// Fail with `InvalidStructure` naming the nodes that cannot be placed.
    Strict,
}

/// Whether a changed `parentId` is checked on update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateParentPolicy {
    /// Apply the change as given.
    #[default]
    Unchecked,
    /// New parent must exist, be a folder, and not be the node or a descendant.
    /// A folder with children cannot become a file.
    Validate,
}

/// What happens to descendants when a node is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// Delete only the node; children keep a dangling `parentId`.
    #[default]
    Orphan,
    /// Delete every descendant, deepest first, then the node.
    Cascade,
}

/// Business-rule settings for [`CatalogService`](super::CatalogService).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogPolicy {
    /// Folder-tree assembly mode.
    pub tree_mode: TreeMode,
    /// Parent re-validation on update.
    pub update_parent: UpdateParentPolicy,
    /// Descendant handling on delete.
    pub delete: DeletePolicy,
    /// Default page size for child listings.
    pub children_page_size: u32,
    /// Default result cap for searches.
    pub search_limit: u32,
    /// Upper bound for any requested page size.
    pub max_page_size: u32,
}

impl Default for CatalogPolicy {
    fn default() -> Self {
        Self {
            tree_mode: TreeMode::default(),
            update_parent: UpdateParentPolicy::default(),
            delete: DeletePolicy::default(),
            children_page_size: super::DEFAULT_CHILDREN_LIMIT,
            search_limit: super::DEFAULT_SEARCH_LIMIT,
            max_page_size: super::MAX_PAGE_SIZE,
        }
    }
}

impl CatalogPolicy {
    /// Set the tree mode.
    pub fn with_tree_mode(mut self, tree_mode: TreeMode) -> Self {
        self.tree_mode = tree_mode;
        self
    }

    /// Set the update policy.
    pub fn with_update_parent(mut self, update_parent: UpdateParentPolicy) -> Self {
        self.update_parent = update_parent;
        self
    }

    /// Set the delete policy.
    pub fn with_delete(mut self, delete: DeletePolicy) -> Self {
        self.delete = delete;
        self
    }
}
