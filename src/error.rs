//! Error types for filecat.

use thiserror::Error;

/// Common error type for filecat.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Node (or parent node) lookup miss.
    #[error("{0} not found")]
    NotFound(String),

    /// A mutation would break the tree shape (e.g. parent is not a folder).
    #[error("{0}")]
    InvalidStructure(String),

    /// Missing required field or malformed value.
    #[error("{0}")]
    InvalidInput(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP transport error on the client side.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failure envelope returned by the server.
    #[error("{0}")]
    Remote(String),
}

impl From<sqlx::Error> for CatalogError {
    fn from(e: sqlx::Error) -> Self {
        CatalogError::Database(e.to_string())
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        CatalogError::Http(e.to_string())
    }
}

/// Result type alias for filecat operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
