//! Menu Repository

use super::{BaseRepository, Repository};
use crate::db::models::Menu;
use crate::utils::ErrorCode;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct MenuRepository {
    base: BaseRepository,
}

impl MenuRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

impl Repository for MenuRepository {
    type Doc = Menu;

    const TABLE: &'static str = "menu";
    const NOT_FOUND: ErrorCode = ErrorCode::MenuNotFound;

    fn base(&self) -> &BaseRepository {
        &self.base
    }
}
