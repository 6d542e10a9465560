//! Restaurant Server - 餐厅管理 REST 后端
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储，每种资源一个仓储
//! - **认证** (`auth`): JWT 访问/刷新令牌 + Argon2 密码哈希
//! - **HTTP API** (`api`): 菜单、菜品、桌台、订单、订单项、账单、用户
//!
//! # 模块结构
//!
//! ```text
//! restaurant-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT、密码、认证中间件
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (模型 + 仓储)
//! └── utils/         # 日志、分页、校验、金额
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 启动前的环境准备: 加载 `.env`，初始化日志
pub fn setup_environment() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let json = std::env::var("LOG_FORMAT")
        .map(|f| f.eq_ignore_ascii_case("json"))
        .ok();
    let log_dir = std::env::var("LOG_DIR").ok();

    if let Some(dir) = &log_dir {
        std::fs::create_dir_all(dir)?;
    }

    init_logger_with_file(log_level.as_deref(), json, log_dir.as_deref());
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____            __                              __
   / __ \___  _____/ /_____ ___  ___________ _____  / /_
  / /_/ / _ \/ ___/ __/ __ `/ / / / ___/ __ `/ __ \/ __/
 / _, _/  __(__  ) /_/ /_/ / /_/ / /  / /_/ / / / / /_
/_/ |_|\___/____/\__/\__,_/\__,_/_/   \__,_/_/ /_/\__/
    "#
    );
}
