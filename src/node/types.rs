//! Node model for the catalog.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::datetime::parse_db_string;

/// Kind of catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// A file (leaf).
    File,
    /// A folder that may contain other nodes.
    Folder,
}

impl NodeType {
    /// Database / wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::File => "FILE",
            NodeType::Folder => "FOLDER",
        }
    }

    /// Sort rank: folders come before files.
    pub fn rank(&self) -> u8 {
        match self {
            NodeType::Folder => 0,
            NodeType::File => 1,
        }
    }

    /// Check if this is a folder.
    pub fn is_folder(&self) -> bool {
        *self == NodeType::Folder
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FILE" => Ok(NodeType::File),
            "FOLDER" => Ok(NodeType::Folder),
            _ => Err(format!("unknown node type: {s}")),
        }
    }
}

impl TryFrom<String> for NodeType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A file or folder metadata record.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Node {
    /// Opaque unique ID, assigned by storage.
    pub id: String,
    /// Display name (not unique among siblings).
    pub name: String,
    /// File or folder.
    #[sqlx(rename = "type", try_from = "String")]
    pub node_type: NodeType,
    /// Parent folder ID (None for root-level nodes).
    pub parent_id: Option<String>,
    /// Size in bytes; meaningful for files only.
    pub size: Option<i64>,
    /// Free-form MIME type.
    pub mime_type: Option<String>,
    /// When the node was created (UTC, database format).
    pub created_at: String,
    /// When the node was last modified (UTC, database format).
    pub updated_at: String,
}

impl Node {
    /// Check if this node is a folder.
    pub fn is_folder(&self) -> bool {
        self.node_type.is_folder()
    }

    /// Check if this node sits at the top level.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Get the created_at as DateTime<Utc>.
    pub fn created_at_datetime(&self) -> Option<DateTime<Utc>> {
        parse_db_string(&self.created_at)
    }

    /// Get the updated_at as DateTime<Utc>.
    pub fn updated_at_datetime(&self) -> Option<DateTime<Utc>> {
        parse_db_string(&self.updated_at)
    }
}

/// Data for creating a new node.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNode {
    /// Node name.
    pub name: String,
    /// File or folder.
    pub node_type: NodeType,
    /// Parent folder ID (None for root-level nodes).
    pub parent_id: Option<String>,
    /// Size in bytes.
    pub size: Option<i64>,
    /// MIME type.
    pub mime_type: Option<String>,
}

impl NewNode {
    /// Create a new root-level node.
    pub fn new(name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            name: name.into(),
            node_type,
            parent_id: None,
            size: None,
            mime_type: None,
        }
    }

    /// Create a new root-level folder.
    pub fn folder(name: impl Into<String>) -> Self {
        Self::new(name, NodeType::Folder)
    }

    /// Create a new root-level file.
    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, NodeType::File)
    }

    /// Set the parent folder.
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Set the size.
    pub fn with_size(mut self, size: i64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the MIME type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Partial update for a node.
///
/// Nullable fields use `Option<Option<T>>`: `None` leaves the field alone,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeUpdate {
    /// New name.
    pub name: Option<String>,
    /// New type.
    pub node_type: Option<NodeType>,
    /// New parent folder ID.
    pub parent_id: Option<Option<String>>,
    /// New size.
    pub size: Option<Option<i64>>,
    /// New MIME type.
    pub mime_type: Option<Option<String>>,
}

impl NodeUpdate {
    /// Create an empty NodeUpdate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the type.
    pub fn node_type(mut self, node_type: NodeType) -> Self {
        self.node_type = Some(node_type);
        self
    }

    /// Set the parent folder ID.
    pub fn parent_id(mut self, parent_id: Option<impl Into<String>>) -> Self {
        self.parent_id = Some(parent_id.map(Into::into));
        self
    }

    /// Set the size.
    pub fn size(mut self, size: Option<i64>) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the MIME type.
    pub fn mime_type(mut self, mime_type: Option<impl Into<String>>) -> Self {
        self.mime_type = Some(mime_type.map(Into::into));
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.node_type.is_none()
            && self.parent_id.is_none()
            && self.size.is_none()
            && self.mime_type.is_none()
    }

    /// Apply this update to an in-memory node.
    pub fn apply_to(&self, node: &mut Node) {
        if let Some(ref name) = self.name {
            node.name = name.clone();
        }
        if let Some(node_type) = self.node_type {
            node.node_type = node_type;
        }
        if let Some(ref parent_id) = self.parent_id {
            node.parent_id = parent_id.clone();
        }
        if let Some(size) = self.size {
            node.size = size;
        }
        if let Some(ref mime_type) = self.mime_type {
            node.mime_type = mime_type.clone();
        }
    }
}

/// A folder-tree entry: the node plus its ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTree {
    /// The node itself.
    pub node: Node,
    /// Child entries, sorted by name.
    pub children: Vec<NodeTree>,
}

impl NodeTree {
    /// Wrap a node with no children.
    pub fn leaf(node: Node) -> Self {
        Self {
            node,
            children: Vec::new(),
        }
    }

    /// Total number of entries in this subtree, including the root.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(NodeTree::count).sum::<usize>()
    }

    /// Find an entry by node ID anywhere in this subtree.
    pub fn find(&self, id: &str) -> Option<&NodeTree> {
        if self.node.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}
