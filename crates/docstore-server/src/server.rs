use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Document store HTTP server.
pub struct StoreServer {
    config: ServerConfig,
}

impl StoreServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the application state and router without binding a socket.
    /// Useful for testing the endpoints with `tower::ServiceExt::oneshot`.
    pub fn build(&self) -> ServerResult<(Arc<AppState>, axum::Router)> {
        let state = AppState::new(&self.config)?;
        let router = build_router(state.clone());
        Ok((state, router))
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let (_state, app) = self.build()?;
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("document store listening on {}", self.config.bind_addr);
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_construction() {
        let server = StoreServer::new(ServerConfig::default());
        assert_eq!(
            server.config().bind_addr,
            "127.0.0.1:8080".parse().unwrap()
        );
    }

    #[test]
    fn build_produces_state_and_router() {
        let server = StoreServer::new(ServerConfig::default());
        let (state, _router) = server.build().unwrap();
        assert!(state.sessions.is_empty());
    }
}
