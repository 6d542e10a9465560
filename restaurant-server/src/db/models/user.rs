//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::serde_helpers;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, MIN_NAME_LEN, MIN_PASSWORD_LEN, validate_not_blank,
};

/// User entity (员工账号)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    /// Argon2 PHC string
    pub password: String,
    pub email: String,
    pub phone: String,
    pub avatar: Option<String>,
    /// 最近签发的 access token
    pub token: Option<String>,
    /// 最近签发的 refresh token, 刷新时必须与之相同
    pub refresh_token: Option<String>,
    #[serde(with = "serde_helpers::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_helpers::timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// User as returned to clients (no password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub avatar: Option<String>,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    #[serde(with = "serde_helpers::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_helpers::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            avatar: user.avatar,
            token: user.token,
            refresh_token: user.refresh_token,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Sign-up payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(required, length(min = MIN_NAME_LEN, max = MAX_NAME_LEN))]
    pub first_name: Option<String>,
    #[validate(required, length(min = MIN_NAME_LEN, max = MAX_NAME_LEN))]
    pub last_name: Option<String>,
    #[validate(required, length(min = MIN_PASSWORD_LEN, max = MAX_PASSWORD_LEN))]
    pub password: Option<String>,
    #[validate(required, email)]
    pub email: Option<String>,
    #[validate(required, custom(function = "validate_not_blank"))]
    pub phone: Option<String>,
    pub avatar: Option<String>,
}

/// Login payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(required, email)]
    pub email: Option<String>,
    #[validate(required, custom(function = "validate_not_blank"))]
    pub password: Option<String>,
}

/// Refresh payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(required, custom(function = "validate_not_blank"))]
    pub refresh_token: Option<String>,
}

/// Token fields written after login / refresh
#[derive(Debug, Clone, Serialize)]
pub struct TokenUpdate {
    pub token: String,
    pub refresh_token: String,
}
