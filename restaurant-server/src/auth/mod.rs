//! 认证模块
//!
//! - [`jwt`] - 访问令牌 / 刷新令牌的签发与校验
//! - [`password`] - Argon2 密码哈希
//! - [`middleware`] - 受保护路由的认证中间件
//! - [`extractor`] - 处理器中提取 [`CurrentUser`]

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService, TokenPair, TokenType};
pub use middleware::require_auth;
pub use password::{
    INVALID_LOGIN_MESSAGE, PasswordError, hash_password, hash_password_blocking, verify_password,
    verify_password_blocking,
};
