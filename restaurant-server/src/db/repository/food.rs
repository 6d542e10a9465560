//! Food Repository

use super::{BaseRepository, Repository};
use crate::db::models::Food;
use crate::utils::ErrorCode;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct FoodRepository {
    base: BaseRepository,
}

impl FoodRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

impl Repository for FoodRepository {
    type Doc = Food;

    const TABLE: &'static str = "food";
    const NOT_FOUND: ErrorCode = ErrorCode::FoodNotFound;

    fn base(&self) -> &BaseRepository {
        &self.base
    }
}
