//! Repository Module
//!
//! One repository per resource table. Documents are stored under their
//! business id (`RecordId::from_table_key(TABLE, id)`), so lookups by business
//! id are direct record selects.

pub mod food;
pub mod invoice;
pub mod menu;
pub mod order;
pub mod order_item;
pub mod table;
pub mod user;

// Re-exports
pub use food::FoodRepository;
pub use invoice::InvoiceRepository;
pub use menu::MenuRepository;
pub use order::OrderRepository;
pub use order_item::OrderItemRepository;
pub use table::TableRepository;
pub use user::UserRepository;

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;
use uuid::Uuid;

use crate::db::models::serde_helpers::format_timestamp;
use crate::utils::types::{Page, Pagination};
use crate::utils::{AppError, ErrorCode};

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    /// Carries the resource-specific not-found code
    #[error("{}", .0.message())]
    NotFound(ErrorCode),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        RepoError::Database(format!("Failed to encode document: {err}"))
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(code) => AppError::new(code),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Fresh business id: 32 lowercase hex digits
pub fn new_business_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Common repository contract
///
/// Implementors name their table and not-found code; the CRUD operations are
/// shared. `update` merges only the fields present in the patch.
#[allow(async_fn_in_trait)]
pub trait Repository {
    type Doc: Serialize + DeserializeOwned + Send + Sync + 'static;

    /// SurrealDB table
    const TABLE: &'static str;
    /// Code reported when a document is missing
    const NOT_FOUND: ErrorCode;

    fn base(&self) -> &BaseRepository;

    /// One page ordered by `created_at`, plus the collection size
    async fn find_all(&self, pagination: &Pagination) -> RepoResult<Page<Self::Doc>> {
        self.base().find_page(Self::TABLE, pagination).await
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Self::Doc>> {
        self.base().find_by_key(Self::TABLE, id).await
    }

    /// Find by id, missing document is an error
    async fn get(&self, id: &str) -> RepoResult<Self::Doc> {
        self.find_by_id(id)
            .await?
            .ok_or(RepoError::NotFound(Self::NOT_FOUND))
    }

    async fn exists(&self, id: &str) -> RepoResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    async fn create(&self, id: &str, doc: Self::Doc) -> RepoResult<Self::Doc> {
        self.base().insert(Self::TABLE, id, doc).await
    }

    async fn update<P: Serialize + Sync>(&self, id: &str, patch: &P) -> RepoResult<Self::Doc> {
        let updated: Option<Self::Doc> = self.base().merge(Self::TABLE, id, patch).await?;
        updated.ok_or(RepoError::NotFound(Self::NOT_FOUND))
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub async fn find_page<T: DeserializeOwned>(
        &self,
        table: &'static str,
        pagination: &Pagination,
    ) -> RepoResult<Page<T>> {
        let mut result = self
            .db
            .query(
                "SELECT * FROM type::table($tb) ORDER BY created_at LIMIT $limit START $start; \
                 SELECT count() FROM type::table($tb) GROUP ALL",
            )
            .bind(("tb", table))
            .bind(("limit", pagination.limit()))
            .bind(("start", pagination.offset()))
            .await?;
        let items: Vec<T> = result.take(0)?;
        let total_count: Option<u64> = result.take((1, "count"))?;
        Ok(Page {
            total_count: total_count.unwrap_or(0),
            items,
        })
    }

    pub async fn find_by_key<T: DeserializeOwned>(
        &self,
        table: &'static str,
        id: &str,
    ) -> RepoResult<Option<T>> {
        let doc: Option<T> = self
            .db
            .select(RecordId::from_table_key(table, id))
            .await?;
        Ok(doc)
    }

    /// All documents whose `field` equals `value`, oldest first
    pub async fn find_where<T: DeserializeOwned>(
        &self,
        table: &'static str,
        field: &'static str,
        value: &str,
    ) -> RepoResult<Vec<T>> {
        let docs: Vec<T> = self
            .db
            .query(format!(
                "SELECT * FROM type::table($tb) WHERE {field} = $value ORDER BY created_at"
            ))
            .bind(("tb", table))
            .bind(("value", value.to_string()))
            .await?
            .take(0)?;
        Ok(docs)
    }

    pub async fn count_where(
        &self,
        table: &'static str,
        field: &'static str,
        value: &str,
    ) -> RepoResult<u64> {
        let count: Option<u64> = self
            .db
            .query(format!(
                "SELECT count() FROM type::table($tb) WHERE {field} = $value GROUP ALL"
            ))
            .bind(("tb", table))
            .bind(("value", value.to_string()))
            .await?
            .take((0, "count"))?;
        Ok(count.unwrap_or(0))
    }

    pub async fn insert<T>(&self, table: &'static str, id: &str, doc: T) -> RepoResult<T>
    where
        T: Serialize + DeserializeOwned + 'static,
    {
        let created: Option<T> = self
            .db
            .create(RecordId::from_table_key(table, id))
            .content(doc)
            .await?;
        created.ok_or_else(|| RepoError::Database(format!("Failed to create {table} {id}")))
    }

    /// Merge `patch` into an existing document; `None` when it does not exist
    pub async fn merge<T: DeserializeOwned>(
        &self,
        table: &'static str,
        id: &str,
        patch: &impl Serialize,
    ) -> RepoResult<Option<T>> {
        let data = stamped(patch)?;
        let updated: Vec<T> = self
            .db
            .query("UPDATE $thing MERGE $data RETURN AFTER")
            .bind(("thing", RecordId::from_table_key(table, id)))
            .bind(("data", data))
            .await?
            .take(0)?;
        Ok(updated.into_iter().next())
    }
}

/// Patch as a JSON object with `updated_at` set
fn stamped(patch: &impl Serialize) -> RepoResult<Value> {
    let mut data = serde_json::to_value(patch)?;
    let Value::Object(fields) = &mut data else {
        return Err(RepoError::Database("patch must be an object".to_string()));
    };
    fields.insert(
        "updated_at".to_string(),
        Value::String(format_timestamp(&Utc::now())),
    );
    Ok(data)
}
