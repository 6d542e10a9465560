//! JWT 令牌服务
//!
//! 签发一对 HS256 令牌 (访问令牌 + 刷新令牌)，并校验签名、过期时间、
//! 签发者、受众和令牌类型。

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::AppError;

/// 密钥最小长度
pub const MIN_SECRET_LEN: usize = 32;

/// JWT 配置
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | JWT_SECRET | (debug 构建随机生成) | 至少 32 个字符 |
/// | JWT_ACCESS_EXPIRATION_MINUTES | 1440 | 访问令牌有效期 (24 小时) |
/// | JWT_REFRESH_EXPIRATION_MINUTES | 10080 | 刷新令牌有效期 (168 小时) |
/// | JWT_ISSUER | restaurant-server | 签发者 |
/// | JWT_AUDIENCE | restaurant-clients | 受众 |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// JWT 密钥 (应至少 32 字节)
    pub secret: String,
    /// 访问令牌过期时间 (分钟)
    pub access_expiration_minutes: i64,
    /// 刷新令牌过期时间 (分钟)
    pub refresh_expiration_minutes: i64,
    /// 令牌签发者
    pub issuer: String,
    /// 令牌受众
    pub audience: String,
}

impl JwtConfig {
    /// 从环境变量加载
    ///
    /// release 构建缺少 `JWT_SECRET` 时返回错误; debug 构建生成临时密钥。
    pub fn from_env() -> Result<Self, JwtError> {
        let secret = load_jwt_secret()?;
        Ok(Self {
            access_expiration_minutes: std::env::var("JWT_ACCESS_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(24 * 60),
            refresh_expiration_minutes: std::env::var("JWT_REFRESH_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(168 * 60),
            ..Self::with_secret(secret)
        })
    }

    /// 使用指定密钥和默认有效期
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_expiration_minutes: 24 * 60,
            refresh_expiration_minutes: 168 * 60,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "restaurant-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "restaurant-clients".to_string()),
        }
    }
}

/// 令牌类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenType::Access => write!(f, "access"),
            TokenType::Refresh => write!(f, "refresh"),
        }
    }
}

/// 存储在令牌中的 JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 用户 ID (Subject)
    pub sub: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// 令牌类型
    pub token_type: TokenType,
    /// 过期时间戳
    pub exp: i64,
    /// 签发时间戳
    pub iat: i64,
    /// 签发者
    pub iss: String,
    /// 受众
    pub aud: String,
    /// 令牌 ID, 保证同一秒内签发的令牌也互不相同
    pub jti: String,
}

/// 一对新签发的令牌
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

/// JWT 错误
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Expected {expected} token, got {actual}")]
    WrongTokenType {
        expected: TokenType,
        actual: TokenType,
    },

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// 生成可打印的安全 JWT 密钥 (用于开发环境)
pub fn generate_secure_printable_jwt_secret() -> Result<String, JwtError> {
    const ALLOWED: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+[]{}|;:,.<>?";

    let rng = SystemRandom::new();
    let mut bytes = [0u8; 64];
    rng.fill(&mut bytes)
        .map_err(|_| JwtError::ConfigError("Failed to generate secure random key".to_string()))?;

    Ok(bytes
        .iter()
        .map(|b| ALLOWED[*b as usize % ALLOWED.len()] as char)
        .collect())
}

/// 从环境变量安全地加载 JWT 密钥
fn load_jwt_secret() -> Result<String, JwtError> {
    match std::env::var("JWT_SECRET") {
        Ok(secret) => {
            if secret.len() < MIN_SECRET_LEN {
                return Err(JwtError::ConfigError(format!(
                    "JWT_SECRET must be at least {MIN_SECRET_LEN} characters long"
                )));
            }
            Ok(secret)
        }
        Err(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!("JWT_SECRET not set! Generating temporary key for development.");
                generate_secure_printable_jwt_secret()
            }
            #[cfg(not(debug_assertions))]
            {
                Err(JwtError::ConfigError(
                    "JWT_SECRET environment variable must be set in production!".to_string(),
                ))
            }
        }
    }
}

/// JWT 令牌服务
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    /// 使用指定配置创建新的 JWT 服务
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    fn generate_token(
        &self,
        token_type: TokenType,
        user_id: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let lifetime = match token_type {
            TokenType::Access => self.config.access_expiration_minutes,
            TokenType::Refresh => self.config.refresh_expiration_minutes,
        };
        let expiration = now + Duration::minutes(lifetime);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            token_type,
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            jti: uuid::Uuid::new_v4().simple().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// 为用户签发访问令牌和刷新令牌
    pub fn generate_tokens(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        user_id: &str,
    ) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            token: self.generate_token(TokenType::Access, user_id, email, first_name, last_name)?,
            refresh_token: self.generate_token(
                TokenType::Refresh,
                user_id,
                email,
                first_name,
                last_name,
            )?,
        })
    }

    /// 验证并解码令牌 (不检查类型)
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidToken => JwtError::InvalidToken(e.to_string()),
                _ => JwtError::InvalidToken(format!("Token validation failed: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }

    fn validate_typed(&self, token: &str, expected: TokenType) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;
        if claims.token_type != expected {
            return Err(JwtError::WrongTokenType {
                expected,
                actual: claims.token_type,
            });
        }
        Ok(claims)
    }

    /// 验证访问令牌 (认证中间件使用)
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_typed(token, TokenType::Access)
    }

    /// 验证刷新令牌
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_typed(token, TokenType::Refresh)
    }

    /// 从 Authorization 头提取令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }
}

/// 当前用户上下文 (从 JWT Claims 解析)
///
/// 由认证中间件创建，注入到请求扩展
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            first_name: claims.first_name,
            last_name: claims.last_name,
        }
    }
}

/// 客户端只看到 "令牌过期" 或 "令牌无效"; 签发失败属于内部错误
impl From<JwtError> for AppError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::ExpiredToken => AppError::token_expired(),
            JwtError::InvalidToken(_)
            | JwtError::InvalidSignature
            | JwtError::WrongTokenType { .. } => AppError::invalid_token("Invalid token"),
            JwtError::GenerationFailed(msg) | JwtError::ConfigError(msg) => AppError::internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::with_config(JwtConfig::with_secret(
            "test-secret-that-is-long-enough-for-hs256",
        ))
    }

    #[test]
    fn test_token_pair_round_trip() {
        let service = service();
        let pair = service
            .generate_tokens("ann@example.com", "Ann", "Lee", "user123")
            .expect("Failed to generate test tokens");

        let claims = service
            .validate_access_token(&pair.token)
            .expect("Failed to validate access token");
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.email, "ann@example.com");
        assert_eq!(claims.first_name, "Ann");
        assert_eq!(claims.last_name, "Lee");
        assert_eq!(claims.token_type, TokenType::Access);

        let refresh = service
            .validate_refresh_token(&pair.refresh_token)
            .expect("Failed to validate refresh token");
        assert_eq!(refresh.token_type, TokenType::Refresh);
        assert_eq!(refresh.exp - refresh.iat, 168 * 3600);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_token_types_not_interchangeable() {
        let service = service();
        let pair = service
            .generate_tokens("ann@example.com", "Ann", "Lee", "user123")
            .unwrap();

        assert!(matches!(
            service.validate_access_token(&pair.refresh_token),
            Err(JwtError::WrongTokenType { .. })
        ));
        assert!(matches!(
            service.validate_refresh_token(&pair.token),
            Err(JwtError::WrongTokenType { .. })
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut config = JwtConfig::with_secret("test-secret-that-is-long-enough-for-hs256");
        config.access_expiration_minutes = -10;
        let service = JwtService::with_config(config);
        let pair = service
            .generate_tokens("ann@example.com", "Ann", "Lee", "user123")
            .unwrap();

        assert!(matches!(
            service.validate_access_token(&pair.token),
            Err(JwtError::ExpiredToken)
        ));
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let other = JwtService::with_config(JwtConfig::with_secret(
            "another-secret-that-is-long-enough-too!!",
        ));
        let pair = other
            .generate_tokens("ann@example.com", "Ann", "Lee", "user123")
            .unwrap();

        assert!(service().validate_access_token(&pair.token).is_err());
        assert!(service().validate_access_token("not.a.jwt").is_err());
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }

    #[test]
    fn test_current_user_from_claims() {
        let service = service();
        let pair = service
            .generate_tokens("ann@example.com", "Ann", "Lee", "user123")
            .unwrap();
        let user = CurrentUser::from(service.validate_access_token(&pair.token).unwrap());
        assert_eq!(user.user_id, "user123");
        assert_eq!(user.email, "ann@example.com");
    }

    #[test]
    fn test_reissued_tokens_differ() {
        let service = service();
        let first = service.generate_tokens("ann@example.com", "Ann", "Lee", "user123").unwrap();
        let second = service.generate_tokens("ann@example.com", "Ann", "Lee", "user123").unwrap();
        assert_ne!(first.refresh_token, second.refresh_token);
    }

    #[test]
    fn test_error_mapping() {
        assert_eq!(
            AppError::from(JwtError::ExpiredToken).code,
            crate::utils::ErrorCode::TokenExpired
        );
        let wrong = JwtError::WrongTokenType {
            expected: TokenType::Access,
            actual: TokenType::Refresh,
        };
        assert_eq!(AppError::from(wrong).code, crate::utils::ErrorCode::TokenInvalid);
        assert!(AppError::from(JwtError::GenerationFailed("boom".into())).is_system());
    }

    #[test]
    fn test_printable_secret() {
        let secret = generate_secure_printable_jwt_secret().unwrap();
        assert_eq!(secret.len(), 64);
        assert!(secret.len() >= MIN_SECRET_LEN);
    }
}
