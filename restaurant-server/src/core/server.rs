//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::future::IntoFuture;
use std::net::SocketAddr;

use crate::api::build_app;
use crate::core::{Config, ServerState};
use crate::utils::AppError;

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    pub async fn run(&self) -> Result<(), AppError> {
        if !self.config.is_production() {
            tracing::warn!(environment = %self.config.environment, "Running in non-production mode");
        }

        let app = build_app(&self.state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
        tracing::info!("Restaurant server listening on {}", addr);

        // 收到信号后停止接收新连接; 超过 shutdown_timeout 仍未结束的连接被丢弃
        let (signalled_tx, signalled_rx) = tokio::sync::oneshot::channel::<()>();
        let shutdown = async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
            let _ = signalled_tx.send(());
        };

        let serve = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .into_future();
        let mut serve = std::pin::pin!(serve);

        tokio::select! {
            result = &mut serve => {
                result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
            }
            _ = signalled_rx => {
                match tokio::time::timeout(self.config.shutdown_timeout(), &mut serve).await {
                    Ok(result) => {
                        result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
                    }
                    Err(_) => {
                        tracing::warn!(
                            timeout_ms = self.config.shutdown_timeout_ms,
                            "Graceful shutdown timed out, dropping open connections"
                        );
                    }
                }
            }
        }

        tracing::info!("Server stopped");
        Ok(())
    }
}
