//! Dining Table Repository
//!
//! Stored as `dining_table`; exposed over HTTP as `/tables`.

use super::{BaseRepository, Repository};
use crate::db::models::Table;
use crate::utils::ErrorCode;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct TableRepository {
    base: BaseRepository,
}

impl TableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

impl Repository for TableRepository {
    type Doc = Table;

    const TABLE: &'static str = "dining_table";
    const NOT_FOUND: ErrorCode = ErrorCode::TableNotFound;

    fn base(&self) -> &BaseRepository {
        &self.base
    }
}
