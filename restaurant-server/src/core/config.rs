use std::path::PathBuf;
use std::time::Duration;

use crate::auth::JwtConfig;
use crate::utils::{AppError, ErrorCode};

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | PORT | 8000 | HTTP 服务端口 |
/// | WORK_DIR | ./data | 工作目录 (数据库) |
/// | ENVIRONMENT | development | 运行环境 |
/// | REQUEST_TIMEOUT_MS | 100000 | 单个请求的截止时间(毫秒) |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 优雅关闭等待时间(毫秒) |
/// | CORS_ALLOWED_ORIGIN | http://localhost:5173 | 允许的前端来源 |
///
/// JWT 相关变量见 [`JwtConfig::from_env`]。
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/restaurant PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
    /// CORS 允许的来源
    pub cors_allowed_origin: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Result<Self, AppError> {
        let jwt = JwtConfig::from_env()
            .map_err(|e| AppError::with_message(ErrorCode::ConfigError, e.to_string()))?;

        Ok(Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            jwt,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(100_000),
            shutdown_timeout_ms: std::env::var("SHUTDOWN_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10_000),
            cors_allowed_origin: std::env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".into()),
        })
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Result<Self, AppError> {
        let mut config = Self::from_env()?;
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        Ok(config)
    }

    /// 数据库目录: `{work_dir}/database/restaurant.db`
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir)
            .join("database")
            .join("restaurant.db")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(PathBuf::from(&self.work_dir).join("database"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_under_work_dir() {
        let config = Config::with_overrides("/tmp/restaurant", 9000).unwrap();
        assert_eq!(config.http_port, 9000);
        assert_eq!(
            config.database_path(),
            PathBuf::from("/tmp/restaurant/database/restaurant.db")
        );
    }

    #[test]
    fn test_timeouts_in_millis() {
        let mut config = Config::with_overrides("/tmp/restaurant", 9000).unwrap();
        config.request_timeout_ms = 1500;
        assert_eq!(config.request_timeout(), Duration::from_millis(1500));
    }
}
