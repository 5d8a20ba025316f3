use std::sync::Arc;

use relay_backend::Backend;
use tokio::net::TcpListener;

use crate::auth::ApiKeyAuth;
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;

/// Activity relayer HTTP server.
pub struct RelayServer {
    config: ServerConfig,
    backend: Arc<Backend>,
}

impl RelayServer {
    pub fn new(config: ServerConfig, backend: Arc<Backend>) -> Self {
        Self { config, backend }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(
            AppState::new(Arc::clone(&self.backend)),
            ApiKeyAuth::new(self.config.api_key.clone()),
        )
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        if self.config.api_key.as_deref().map_or(true, str::is_empty) {
            tracing::warn!("no api key configured, protected routes will answer 500");
        }
        let app = self.router();
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(
            addr = %self.config.bind_addr,
            linera = self.backend.is_remote_active(),
            "relayer listening"
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
