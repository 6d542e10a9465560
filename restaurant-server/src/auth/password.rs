//! 密码哈希
//!
//! Argon2id, 工作因子 14 (内存开销 2^14 KiB)。哈希与校验都是 CPU 密集操作，
//! 处理器中通过 [`hash_password_blocking`] / [`verify_password_blocking`]
//! 放到阻塞线程池执行。

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::{SaltString, rand_core::OsRng},
};
use thiserror::Error;

use crate::utils::AppError;

/// 登录失败的统一提示 (未知邮箱与密码错误不可区分)
pub const INVALID_LOGIN_MESSAGE: &str = "login or password is incorrect";

/// 工作因子: 内存开销为 2^HASH_COST KiB
pub const HASH_COST: u32 = 14;
const HASH_ITERATIONS: u32 = 2;
const HASH_PARALLELISM: u32 = 1;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Password task failed: {0}")]
    Task(String),
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::internal(err.to_string())
    }
}

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(1 << HASH_COST, HASH_ITERATIONS, HASH_PARALLELISM, None)
        .map_err(|e| PasswordError::Hash(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// 生成带随机盐的密码哈希 (PHC 字符串)
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher()?
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// 校验密码
///
/// 返回 `(是否匹配, 提示信息)`; 匹配时提示为空。
/// 哈希格式损坏视为不匹配，参数取自哈希串本身。
pub fn verify_password(candidate: &str, hash: &str) -> (bool, &'static str) {
    let valid = PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false);

    if valid {
        (true, "")
    } else {
        (false, INVALID_LOGIN_MESSAGE)
    }
}

/// [`hash_password`] 的阻塞线程池版本
pub async fn hash_password_blocking(plain: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .map_err(|e| PasswordError::Task(e.to_string()))?
}

/// [`verify_password`] 的阻塞线程池版本
pub async fn verify_password_blocking(
    candidate: String,
    hash: String,
) -> Result<(bool, &'static str), PasswordError> {
    tokio::task::spawn_blocking(move || verify_password(&candidate, &hash))
        .await
        .map_err(|e| PasswordError::Task(e.to_string()))
}
