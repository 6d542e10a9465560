//! User API 模块
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /users/signup | POST | 注册 | 无 |
//! | /users/login | POST | 登录 | 无 |
//! | /users/refresh | POST | 刷新令牌 (轮换) | 无 |
//! | /users | GET | 分页列表 | 需要 |
//! | /users/{user_id} | GET | 单个用户 | 需要 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// 公共路由 (无需认证)
pub fn public_router() -> Router<ServerState> {
    Router::new()
        .route("/users/signup", post(handler::signup))
        .route("/users/login", post(handler::login))
        .route("/users/refresh", post(handler::refresh))
}

/// 受保护路由
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/users", get(handler::list))
        .route("/users/{user_id}", get(handler::get_by_id))
}
