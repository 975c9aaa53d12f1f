use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

pub mod memory;
pub mod postgres;

/// Raised by `UserStore::create` when the email is already taken. Postgres
/// reports this via the unique constraint, so the same error covers the
/// window between any pre-check and the insert.
#[derive(Debug, thiserror::Error)]
#[error("email already registered")]
pub struct DuplicateEmail;

/// Account role. Admins may list users and toggle the block flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, never exposed in JSON
    pub role: Role,
    pub is_blocked: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Todo record. `user_id` is the owner and is immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Partial update applied to a todo. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, email: &str, password_hash: &str) -> anyhow::Result<User>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn list(&self) -> anyhow::Result<Vec<User>>;
    async fn set_blocked(&self, id: Uuid, blocked: bool) -> anyhow::Result<Option<User>>;
    async fn set_role(&self, id: Uuid, role: Role) -> anyhow::Result<Option<User>>;
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn create(&self, user_id: Uuid, text: &str) -> anyhow::Result<Todo>;
    /// Todos owned by `user_id`, newest first.
    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Todo>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Todo>>;
    async fn update(&self, id: Uuid, patch: TodoPatch) -> anyhow::Result<Option<Todo>>;
    /// Returns false when no row matched `id`.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
