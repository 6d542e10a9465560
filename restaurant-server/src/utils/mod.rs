//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`logger`] - 日志初始化
//! - [`types`] - 分页参数与分页结果
//! - [`validation`] - 请求体校验与 `ValidatedJson` 提取器
//! - [`money`] - 金额规整

pub mod logger;
pub mod money;
pub mod types;
pub mod validation;

// Re-export error types from shared
pub use shared::error::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};
