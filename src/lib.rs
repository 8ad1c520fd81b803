//! filecat - virtual file/folder catalog
//!
//! A tree of FILE and FOLDER metadata records stored in SQLite and served
//! over a JSON REST API, plus the client-side state used to browse it.

pub mod client;
pub mod config;
pub mod datetime;
pub mod db;
pub mod error;
pub mod logging;
pub mod node;
pub mod web;

pub use client::{
    CatalogApi, FileSystemState, HttpCatalogClient, SearchState, SearchView, ViewState,
};
pub use config::{ClientConfig, Config, StatusMode, WebConfig};
pub use db::Database;
pub use error::{CatalogError, Result};
pub use node::{
    CatalogPolicy, CatalogService, ChildrenPage, DeletePolicy, NewNode, Node, NodeTree, NodeType,
    NodeUpdate, TreeMode, UpdateParentPolicy,
};
pub use web::{AppState, WebServer};
