//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查 (公共)
//! - [`users`] - 注册 / 登录 / 刷新 (公共)，用户查询 (受保护)
//! - [`menus`] - 菜单管理
//! - [`foods`] - 菜品管理
//! - [`tables`] - 桌台管理
//! - [`orders`] - 订单管理
//! - [`order_items`] - 订单项管理、批量下单、订单汇总
//! - [`invoices`] - 账单管理
//!
//! 除 [`health`] 与用户公共接口外，所有路由都经过 [`require_auth`]。

pub mod middleware;

pub mod foods;
pub mod health;
pub mod invoices;
pub mod menus;
pub mod order_items;
pub mod orders;
pub mod tables;
pub mod users;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue, Method, header};
use serde::Deserialize;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::middleware::LEGACY_TOKEN_HEADER;
use crate::auth::require_auth;
use crate::core::ServerState;

/// `PATCH ...?upsert=true`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct UpsertQuery {
    #[serde(default)]
    pub upsert: bool,
}

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Routes that require an access token
fn protected_routes(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .merge(menus::router())
        .merge(foods::router())
        .merge(tables::router())
        .merge(orders::router())
        .merge(order_items::router())
        .merge(invoices::router())
        .merge(users::router())
        .route_layer(axum_middleware::from_fn_with_state(state.clone(), require_auth))
}

/// Build a router with all routes registered (no outer middleware, no state)
pub fn build_router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        // Health API - public route
        .merge(health::router())
        // Sign-up / login / refresh - public routes
        .merge(users::public_router())
        // Everything else - authentication required
        .merge(protected_routes(state))
}

fn cors_layer(state: &ServerState) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(LEGACY_TOKEN_HEADER),
        ])
        .expose_headers([header::CONTENT_LENGTH])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(12 * 60 * 60));

    match state.config.cors_allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            tracing::warn!(
                origin = %state.config.cors_allowed_origin,
                error = %e,
                "Invalid CORS origin, cross-origin requests will be rejected"
            );
            layer
        }
    }
}

/// Build a fully configured application with all middleware and state
///
/// Used by both the HTTP server and the integration tests.
pub fn build_app(state: &ServerState) -> Router {
    build_router(state)
        // Deadline - innermost, wraps the handler (and auth) only
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::deadline_middleware,
        ))
        // ========== Tower HTTP Middleware ==========
        // CORS - Handle cross-origin requests
        .layer(cors_layer(state))
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Request logging
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .with_state(state.clone())
}
