//! File-browser view state.
//!
//! [`FileSystemState`] keeps a local view of the catalog (folder tree,
//! selection, children of the selection) and publishes every change on a
//! `watch` channel. Mutations go to the server and are followed by a full
//! reload; nothing is patched locally.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use super::api::CatalogApi;
use crate::node::{sort_nodes, NewNode, Node, NodeTree, NodeUpdate};
use crate::{CatalogError, Result};

/// Snapshot of the file-browser view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Folder forest.
    pub folder_tree: Vec<NodeTree>,
    /// Currently selected node.
    pub selected: Option<Node>,
    /// Children of the selected node, folders first then by name.
    pub children: Vec<Node>,
    /// Folder IDs expanded in the tree.
    pub open_folders: HashSet<String>,
    /// A request is in flight.
    pub loading: bool,
    /// Last failure message.
    pub error: Option<String>,
}

impl ViewState {
    /// Whether a folder is expanded.
    pub fn is_open(&self, id: &str) -> bool {
        self.open_folders.contains(id)
    }
}

/// Explicit state container for the file browser.
pub struct FileSystemState<A> {
    api: Arc<A>,
    view: watch::Sender<ViewState>,
}

impl<A: CatalogApi> FileSystemState<A> {
    /// Create an empty state over `api`.
    pub fn new(api: Arc<A>) -> Self {
        let (view, _) = watch::channel(ViewState::default());
        Self { api, view }
    }

    /// Receive every published view.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.view.subscribe()
    }

    /// Current view.
    pub fn snapshot(&self) -> ViewState {
        self.view.borrow().clone()
    }

    /// Reload the folder tree.
    pub async fn load_folder_tree(&self) -> Result<()> {
        self.begin();

        match self.api.get_folder_tree().await {
            Ok(tree) => {
                self.view.send_modify(|v| {
                    // Forget expansion state for folders that no longer exist.
                    v.open_folders
                        .retain(|id| tree.iter().any(|root| root.find(id).is_some()));
                    v.folder_tree = tree;
                    v.loading = false;
                });
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load folder tree");
                self.fail(e.to_string());
                Err(e)
            }
        }
    }

    /// Select a node and load its children.
    pub async fn select_node(&self, node: Node) -> Result<()> {
        let id = node.id.clone();
        self.view.send_modify(|v| {
            v.selected = Some(node);
            v.loading = true;
            v.error = None;
        });

        match self.api.get_children(Some(id.as_str()), None, None).await {
            Ok(page) => {
                let mut children = page.nodes;
                sort_nodes(&mut children);
                self.view.send_modify(|v| {
                    v.children = children;
                    v.loading = false;
                });
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, node_id = %id, "Failed to load children");
                self.view.send_modify(|v| v.children.clear());
                self.fail(e.to_string());
                Err(e)
            }
        }
    }

    /// Expand or collapse a folder in the tree.
    ///
    /// Returns the new expansion state, or `None` when the folder is not
    /// part of the loaded tree.
    pub fn toggle_folder(&self, id: &str) -> Option<bool> {
        let mut toggled = None;
        self.view.send_if_modified(|v| {
            if !v.folder_tree.iter().any(|root| root.find(id).is_some()) {
                return false;
            }
            let open = if v.open_folders.remove(id) {
                false
            } else {
                v.open_folders.insert(id.to_string());
                true
            };
            toggled = Some(open);
            true
        });
        toggled
    }

    /// Create a node, then reload.
    pub async fn create_node(&self, node: &NewNode) -> Result<Node> {
        self.begin();
        let created = match self.api.create_node(node).await {
            Ok(created) => created,
            Err(e) => return Err(self.mutation_failed("create", e)),
        };

        self.reload().await?;
        Ok(created)
    }

    /// Update a node, then reload.
    pub async fn update_node(&self, id: &str, update: &NodeUpdate) -> Result<Node> {
        self.begin();
        let updated = match self.api.update_node(id, update).await {
            Ok(updated) => updated,
            Err(e) => return Err(self.mutation_failed("update", e)),
        };

        // Keep the selection in step with a renamed/moved node.
        self.view.send_if_modified(|v| match v.selected {
            Some(ref selected) if selected.id == updated.id => {
                v.selected = Some(updated.clone());
                true
            }
            _ => false,
        });

        self.reload().await?;
        Ok(updated)
    }

    /// Delete a node, then reload.
    ///
    /// Deleting the selected node clears the selection.
    pub async fn delete_node(&self, id: &str) -> Result<()> {
        self.begin();
        if let Err(e) = self.api.delete_node(id).await {
            return Err(self.mutation_failed("delete", e));
        }

        self.view.send_if_modified(|v| match v.selected {
            Some(ref selected) if selected.id == id => {
                v.selected = None;
                v.children.clear();
                true
            }
            _ => false,
        });

        self.reload().await
    }

    /// Reload the tree and, when something is selected, its children.
    async fn reload(&self) -> Result<()> {
        self.load_folder_tree().await?;

        let selected = self.view.borrow().selected.clone();
        if let Some(node) = selected {
            self.select_node(node).await?;
        }
        Ok(())
    }

    fn begin(&self) {
        self.view.send_modify(|v| {
            v.loading = true;
            v.error = None;
        });
    }

    fn fail(&self, message: String) {
        self.view.send_modify(|v| {
            v.error = Some(message);
            v.loading = false;
        });
    }

    fn mutation_failed(&self, action: &str, e: CatalogError) -> CatalogError {
        warn!(error = %e, action, "Catalog mutation failed");
        self.fail(e.to_string());
        e
    }
}
