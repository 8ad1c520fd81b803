//! Middleware for Web API.

pub mod cors;
pub mod status;

pub use cors::create_cors_layer;
pub use status::always_ok;
