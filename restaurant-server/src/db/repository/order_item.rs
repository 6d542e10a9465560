//! Order Item Repository

use super::{BaseRepository, RepoResult, Repository};
use crate::db::models::OrderItem;
use crate::utils::ErrorCode;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct OrderItemRepository {
    base: BaseRepository,
}

impl OrderItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All items of an order, oldest first
    pub async fn find_by_order(&self, order_id: &str) -> RepoResult<Vec<OrderItem>> {
        self.base.find_where(Self::TABLE, "order_id", order_id).await
    }
}

impl Repository for OrderItemRepository {
    type Doc = OrderItem;

    const TABLE: &'static str = "order_item";
    const NOT_FOUND: ErrorCode = ErrorCode::OrderItemNotFound;

    fn base(&self) -> &BaseRepository {
        &self.base
    }
}
