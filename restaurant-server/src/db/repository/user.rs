//! User Repository

use super::{BaseRepository, RepoResult, Repository};
use crate::db::models::{TokenUpdate, User};
use crate::utils::ErrorCode;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find user by email (login)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let users: Vec<User> = self.base.find_where(Self::TABLE, "email", email).await?;
        Ok(users.into_iter().next())
    }

    pub async fn count_by_email(&self, email: &str) -> RepoResult<u64> {
        self.base.count_where(Self::TABLE, "email", email).await
    }

    pub async fn count_by_phone(&self, phone: &str) -> RepoResult<u64> {
        self.base.count_where(Self::TABLE, "phone", phone).await
    }

    /// Store a freshly issued token pair
    pub async fn save_tokens(&self, user_id: &str, token: &str, refresh_token: &str) -> RepoResult<User> {
        let patch = TokenUpdate {
            token: token.to_string(),
            refresh_token: refresh_token.to_string(),
        };
        self.update(user_id, &patch).await
    }
}

impl Repository for UserRepository {
    type Doc = User;

    const TABLE: &'static str = "user";
    const NOT_FOUND: ErrorCode = ErrorCode::UserNotFound;

    fn base(&self) -> &BaseRepository {
        &self.base
    }
}
