use async_trait::async_trait;

use fitcoach_types::{ChatThread, Provider, User};

use crate::error::Result;

/// Trait for database persistence operations.
///
/// Implementations provide database-specific CRUD over the user and chat
/// stores. Object-safe so the API server can hold `Arc<dyn PersistenceClient>`
/// and tests can substitute an in-memory fake.
#[async_trait]
pub trait PersistenceClient: Send + Sync {
    /// Find a user by exact email, if one exists.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Create a user. Fails with `PersistError::DuplicateEmail` when the
    /// email is already registered.
    async fn create_user(
        &self,
        email: &str,
        password_hash: Option<&str>,
        provider: Provider,
    ) -> Result<User>;

    /// Upsert a thread by id; conflict overwrites title, messages and
    /// updated_at only.
    async fn save_thread(&self, thread: &ChatThread) -> Result<()>;

    /// All threads for a user ordered by updated_at descending.
    async fn threads_for_user(&self, user_id: &str) -> Result<Vec<ChatThread>>;

    /// Fetch a single thread by id.
    async fn get_thread(&self, thread_id: &str) -> Result<Option<ChatThread>>;

    /// Owner (`user_id`) of a thread, or `None` when absent.
    async fn thread_owner(&self, thread_id: &str) -> Result<Option<String>>;

    /// Delete a thread by id. Idempotent.
    async fn delete_thread(&self, thread_id: &str) -> Result<()>;
}
