//! Catalog node module.
//!
//! A node is a FILE or FOLDER metadata record. Nodes form a forest through
//! `parent_id`; this module holds the model, ordering rules, tree assembly,
//! the storage gateway and the catalog service built on top of it.

mod gateway;
mod order;
mod policy;
mod repository;
mod service;
mod tree;
mod types;

pub use gateway::NodeGateway;
pub use order::{compare_names, compare_nodes, fold_case, sort_key, sort_nodes};
pub use policy::{CatalogPolicy, DeletePolicy, TreeMode, UpdateParentPolicy};
pub use repository::NodeRepository;
pub use service::{CatalogService, ChildrenPage};
pub use tree::build_tree;
pub use types::{NewNode, Node, NodeTree, NodeType, NodeUpdate};

/// Path sentinel meaning "top level" in child listings.
pub const ROOT_PARENT: &str = "root";

/// Default page size for child listings.
pub const DEFAULT_CHILDREN_LIMIT: u32 = 100;

/// Default result cap for name searches.
pub const DEFAULT_SEARCH_LIMIT: u32 = 50;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Maximum node name length in characters.
pub const MAX_NAME_LENGTH: usize = 255;
