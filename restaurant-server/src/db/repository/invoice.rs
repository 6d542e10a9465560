//! Invoice Repository

use super::{BaseRepository, Repository};
use crate::db::models::Invoice;
use crate::utils::ErrorCode;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct InvoiceRepository {
    base: BaseRepository,
}

impl InvoiceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

impl Repository for InvoiceRepository {
    type Doc = Invoice;

    const TABLE: &'static str = "invoice";
    const NOT_FOUND: ErrorCode = ErrorCode::InvoiceNotFound;

    fn base(&self) -> &BaseRepository {
        &self.base
    }
}
