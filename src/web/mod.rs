//! Web API module for filecat.
//!
//! Serves the catalog over a JSON REST API under `/api/v1`. Every catalog
//! response uses the `{success, data|error, meta?}` envelope.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
