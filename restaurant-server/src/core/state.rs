use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{
    FoodRepository, InvoiceRepository, MenuRepository, OrderItemRepository, OrderRepository,
    TableRepository, UserRepository,
};
use crate::utils::AppError;

/// 全部资源仓储
///
/// 启动时构造一次，随 [`ServerState`] 注入到每个处理器。
/// 每个仓储内部只持有数据库句柄的克隆。
#[derive(Clone)]
pub struct Repositories {
    pub menus: MenuRepository,
    pub foods: FoodRepository,
    pub tables: TableRepository,
    pub orders: OrderRepository,
    pub order_items: OrderItemRepository,
    pub invoices: InvoiceRepository,
    pub users: UserRepository,
}

impl Repositories {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            menus: MenuRepository::new(db.clone()),
            foods: FoodRepository::new(db.clone()),
            tables: TableRepository::new(db.clone()),
            orders: OrderRepository::new(db.clone()),
            order_items: OrderItemRepository::new(db.clone()),
            invoices: InvoiceRepository::new(db.clone()),
            users: UserRepository::new(db),
        }
    }
}

/// 服务器状态
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 服务器配置 |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | repos | Repositories | 资源仓储 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
///
/// 所有字段都是廉价克隆 (Arc 或句柄)，axum 每个请求克隆一次。
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 资源仓储
    pub repos: Repositories,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// 由已打开的数据库构造状态
    pub fn new(config: Config, db: Surreal<Db>, jwt_service: Arc<JwtService>) -> Self {
        Self {
            repos: Repositories::new(db.clone()),
            config,
            db,
            jwt_service,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 创建工作目录
    /// 2. 打开数据库
    /// 3. 构造 JWT 服务和仓储
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config.ensure_work_dir_structure().map_err(|e| {
            AppError::internal(format!("Failed to create work directory structure: {e}"))
        })?;

        let db_service = DbService::new(&config.database_path()).await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self::new(config.clone(), db_service.db, jwt_service))
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
