//! Client-side catalog access and view state.
//!
//! [`CatalogApi`] abstracts the REST API; [`HttpCatalogClient`] talks to a
//! running server while [`CatalogService`](crate::node::CatalogService)
//! implements the same trait in-process. [`FileSystemState`] and
//! [`SearchState`] hold the browser view on top of either.

mod api;
mod search;
mod state;

pub use api::{CatalogApi, HttpCatalogClient};
pub use search::{SearchState, SearchView};
pub use state::{FileSystemState, ViewState};
