//! API handlers for the catalog Web API.

pub mod health;
pub mod node;

pub use health::*;
pub use node::*;

use crate::node::CatalogService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Catalog business rules over the node store.
    pub catalog: CatalogService,
}

impl AppState {
    /// Create a new application state.
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }
}
