//! Database Module
//!
//! Embedded SurrealDB (RocksDB backend). One table per resource; the
//! business id of a document doubles as its record key.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

/// SurrealDB namespace
pub const NAMESPACE: &str = "restaurant";
/// SurrealDB database
pub const DATABASE: &str = "restaurant";

/// Database service, owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database at `db_path`
    pub async fn new(db_path: &Path) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::with_db(db).await
    }

    /// Select namespace/database on an already opened handle
    pub async fn with_db(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select database: {e}")))?;

        tracing::info!(namespace = NAMESPACE, database = DATABASE, "Database connection established");
        Ok(Self { db })
    }
}
