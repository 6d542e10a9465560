//! 认证中间件
//!
//! 为受保护路由提供 JWT 访问令牌校验

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// 兼容旧客户端的令牌请求头
pub const LEGACY_TOKEN_HEADER: &str = "token";

/// 从请求头读取令牌
///
/// 优先 `Authorization: Bearer <token>`，其次原始 `token` 头。
/// `Authorization` 存在但不是 Bearer 格式时视为无效令牌。
pub fn token_from_headers(headers: &HeaderMap) -> Result<Option<&str>, AppError> {
    if let Some(header) = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        return JwtService::extract_from_header(header)
            .map(Some)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"));
    }

    Ok(headers
        .get(LEGACY_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|t| !t.is_empty()))
}

/// 校验访问令牌，失败时记录安全日志
pub fn authenticate(state: &ServerState, token: &str, uri: &http::Uri) -> Result<CurrentUser, AppError> {
    match state.get_jwt_service().validate_access_token(token) {
        Ok(claims) => Ok(CurrentUser::from(claims)),
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", uri)
            );
            Err(e.into())
        }
    }
}

/// 认证中间件 - 要求用户登录
///
/// 只挂在受保护的路由上 (`route_layer`)，公共路由 (注册、登录、刷新、健康检查)
/// 不经过此中间件。验证成功后将 [`CurrentUser`] 注入请求扩展。
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无令牌 | 401 NotAuthenticated |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 / 刷新令牌 | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let token = match token_from_headers(req.headers())? {
        Some(token) => token.to_string(),
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    let user = authenticate(&state, &token, req.uri())?;
    req.extensions_mut().insert(user.clone());

    // 回写到响应，供外层访问日志使用
    let mut response = next.run(req).await;
    response.extensions_mut().insert(user);
    Ok(response)
}
