//! User API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;

use crate::auth::{hash_password_blocking, verify_password_blocking};
use crate::core::ServerState;
use crate::db::models::{LoginRequest, RefreshRequest, SignupRequest, User, UserResponse};
use crate::db::repository::{Repository, new_business_id};
use crate::security_log;
use crate::utils::types::{Page, Pagination, PaginationQuery};
use crate::utils::validation::ValidatedJson;
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /users - 分页获取用户
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<Page<UserResponse>>> {
    let pagination = Pagination::try_from(query)?;
    let page = state.repos.users.find_all(&pagination).await.map_err(|e| {
        tracing::error!(event = "user_list_error", error = %e, "Failed to list users");
        AppError::from(e)
    })?;
    Ok(Json(Page {
        total_count: page.total_count,
        items: page.items.into_iter().map(UserResponse::from).collect(),
    }))
}

/// GET /users/{user_id} - 获取单个用户
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state.repos.users.get(&user_id).await.map_err(|e| {
        tracing::error!(event = "user_get_error", user_id = %user_id, error = %e, "Failed to fetch user");
        AppError::from(e)
    })?;
    Ok(Json(user.into()))
}

/// POST /users/signup - 注册
///
/// 邮箱和手机号在用户中唯一 (写入前检查); 注册即签发一对令牌。
pub async fn signup(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> AppResult<Json<UserResponse>> {
    let email = payload.email.unwrap_or_default();
    let phone = payload.phone.unwrap_or_default();
    let users = &state.repos.users;

    if users.count_by_email(&email).await? > 0 || users.count_by_phone(&phone).await? > 0 {
        tracing::warn!(event = "user_signup_error", email = %email, error = "duplicate email or phone", "Sign-up rejected");
        return Err(AppError::new(ErrorCode::EmailOrPhoneExists));
    }

    let password = hash_password_blocking(payload.password.unwrap_or_default()).await?;

    let user_id = new_business_id();
    let first_name = payload.first_name.unwrap_or_default();
    let last_name = payload.last_name.unwrap_or_default();
    let tokens = state
        .jwt_service
        .generate_tokens(&email, &first_name, &last_name, &user_id)?;

    let now = Utc::now();
    let user = User {
        user_id: user_id.clone(),
        first_name,
        last_name,
        password,
        email,
        phone,
        avatar: payload.avatar,
        token: Some(tokens.token),
        refresh_token: Some(tokens.refresh_token),
        created_at: now,
        updated_at: now,
    };

    let user = users.create(&user_id, user).await.map_err(|e| {
        tracing::error!(event = "user_signup_error", user_id = %user_id, error = %e, "User was not created");
        AppError::from(e)
    })?;

    tracing::info!(event = "user_signup_success", user_id = %user_id, "User signed up");
    Ok(Json(user.into()))
}

/// POST /users/login - 登录
///
/// 未知邮箱与密码错误返回同样的 401 和提示。新令牌写回失败只记日志。
pub async fn login(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<UserResponse>> {
    let email = payload.email.unwrap_or_default();

    let Some(mut user) = state.repos.users.find_by_email(&email).await? else {
        security_log!("WARN", "login_failed", email = email.clone(), reason = "unknown email");
        return Err(AppError::invalid_credentials());
    };

    let (valid, message) =
        verify_password_blocking(payload.password.unwrap_or_default(), user.password.clone()).await?;
    if !valid {
        security_log!("WARN", "login_failed", email = email.clone(), reason = "wrong password");
        return Err(AppError::with_message(ErrorCode::InvalidCredentials, message));
    }

    let tokens = state.jwt_service.generate_tokens(
        &user.email,
        &user.first_name,
        &user.last_name,
        &user.user_id,
    )?;

    if let Err(e) = state
        .repos
        .users
        .save_tokens(&user.user_id, &tokens.token, &tokens.refresh_token)
        .await
    {
        tracing::error!(event = "user_login_error", user_id = %user.user_id, error = %e, "Failed to persist tokens");
    }

    user.token = Some(tokens.token);
    user.refresh_token = Some(tokens.refresh_token);
    user.updated_at = Utc::now();

    tracing::info!(event = "user_login_success", user_id = %user.user_id, "User logged in");
    Ok(Json(user.into()))
}

/// POST /users/refresh - 刷新令牌
///
/// 刷新令牌必须与该用户最近一次签发的一致; 成功后旧刷新令牌失效。
pub async fn refresh(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<RefreshRequest>,
) -> AppResult<Json<UserResponse>> {
    let presented = payload.refresh_token.unwrap_or_default();

    let claims = state
        .jwt_service
        .validate_refresh_token(&presented)
        .map_err(|e| {
            security_log!("WARN", "refresh_failed", error = format!("{}", e));
            AppError::from(e)
        })?;

    let user = state.repos.users.find_by_id(&claims.sub).await?;
    let Some(user) = user.filter(|u| u.refresh_token.as_deref() == Some(presented.as_str())) else {
        security_log!("WARN", "refresh_revoked", user_id = claims.sub.clone());
        return Err(AppError::invalid_token("Refresh token is no longer valid"));
    };

    let tokens = state.jwt_service.generate_tokens(
        &user.email,
        &user.first_name,
        &user.last_name,
        &user.user_id,
    )?;

    let user = state
        .repos
        .users
        .save_tokens(&user.user_id, &tokens.token, &tokens.refresh_token)
        .await
        .map_err(|e| {
            tracing::error!(event = "user_refresh_error", user_id = %user.user_id, error = %e, "Failed to rotate tokens");
            AppError::from(e)
        })?;

    tracing::info!(event = "user_refresh_success", user_id = %user.user_id, "Tokens rotated");
    Ok(Json(user.into()))
}
