//! Order Repository

use super::{BaseRepository, Repository};
use crate::db::models::Order;
use crate::utils::ErrorCode;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

impl Repository for OrderRepository {
    type Doc = Order;

    // `order` is a SurrealQL keyword
    const TABLE: &'static str = "orders";
    const NOT_FOUND: ErrorCode = ErrorCode::OrderNotFound;

    fn base(&self) -> &BaseRepository {
        &self.base
    }
}
