//! Web server for the catalog API.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::WebConfig;
use crate::node::CatalogService;
use crate::{CatalogError, Result};

use super::handlers::AppState;
use super::router::create_router;

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Web configuration.
    web_config: WebConfig,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &WebConfig, catalog: CatalogService) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port)
            .parse()
            .map_err(|e| {
                CatalogError::Config(format!(
                    "invalid web server address {}:{}: {}",
                    config.host, config.port, e
                ))
            })?;

        Ok(Self {
            addr,
            app_state: Arc::new(AppState::new(catalog)),
            web_config: config.clone(),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Build the full router without binding.
    pub fn router(&self) -> Router {
        create_router(self.app_state.clone(), &self.web_config)
    }

    /// Run the web server.
    pub async fn run(self) -> Result<()> {
        let router = self.router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await?;
        Ok(())
    }

    /// Run the server and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr> {
        let router = self.router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    fn create_test_config() -> WebConfig {
        WebConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Use random port
            ..WebConfig::default()
        }
    }

    #[tokio::test]
    async fn test_web_server_new() {
        let config = create_test_config();
        let db = Database::open_in_memory().await.unwrap();

        let server = WebServer::new(&config, CatalogService::from_database(&db)).unwrap();
        assert_eq!(server.addr().ip().to_string(), "127.0.0.1");
    }

    #[tokio::test]
    async fn test_web_server_rejects_bad_host() {
        let config = WebConfig {
            host: "not a host".to_string(),
            ..create_test_config()
        };
        let db = Database::open_in_memory().await.unwrap();

        let result = WebServer::new(&config, CatalogService::from_database(&db));
        assert!(matches!(result, Err(CatalogError::Config(_))));
    }

    #[tokio::test]
    async fn test_web_server_run() {
        let config = create_test_config();
        let db = Database::open_in_memory().await.unwrap();

        let server = WebServer::new(&config, CatalogService::from_database(&db)).unwrap();
        let addr = server.run_with_addr().await.unwrap();

        // Test health endpoint
        let client = reqwest::Client::new();
        let resp = client
            .get(format!("http://{}/health", addr))
            .send()
            .await
            .unwrap();

        assert!(resp.status().is_success());
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["status"], "ok");
    }
}
