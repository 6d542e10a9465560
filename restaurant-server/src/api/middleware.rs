//! 请求级中间件
//!
//! - [`logging_middleware`] - 访问日志
//! - [`deadline_middleware`] - 单请求截止时间

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;
use tracing::{info, warn};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppError;

/// 请求日志中间件
///
/// 记录请求开始和结束，包含以下信息：
/// - 请求 ID (x-request-id)
/// - HTTP 方法和路径
/// - 用户代理 (User Agent)
/// - 认证用户 (认证中间件把 [`CurrentUser`] 回写到响应扩展)
/// - 响应状态码
/// - 请求延迟 (毫秒)
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        user_agent = %user_agent,
        "Request started"
    );

    let response = next.run(req).await;

    let latency = start.elapsed();
    let status = response.status();
    let user = response
        .extensions()
        .get::<CurrentUser>()
        .map(|u| format!("{}({})", u.email, u.user_id));

    if status.is_server_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            user = ?user,
            "Request completed with server error"
        );
    } else if status.is_client_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            user = ?user,
            "Request completed with client error"
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status.as_u16(),
            latency_ms = %latency.as_millis(),
            user = ?user,
            "Request completed successfully"
        );
    }

    response
}

/// 截止时间中间件
///
/// 超时后丢弃处理器 future (同时取消进行中的数据库调用)，返回 500。
pub async fn deadline_middleware(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Response {
    let deadline = state.config.request_timeout();
    let uri = req.uri().clone();

    match tokio::time::timeout(deadline, next.run(req)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(
                uri = %uri,
                timeout_ms = %deadline.as_millis(),
                "Request deadline exceeded"
            );
            AppError::timeout("request timed out").into_response()
        }
    }
}
