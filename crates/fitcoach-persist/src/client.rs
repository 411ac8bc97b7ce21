use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use fitcoach_types::{ChatThread, Provider, User};

use crate::error::{PersistError, Result};
use crate::repositories::{ChatRepository, UserRepository};
use crate::schema;
use crate::trait_client::PersistenceClient;

/// PostgreSQL-backed persistence client.
pub struct PgPersistenceClient {
    users: UserRepository,
    chats: ChatRepository,
    pool: PgPool,
}

impl PgPersistenceClient {
    /// Connect to PostgreSQL and apply the schema.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        let client = Self::from_pool(pool);
        client.ensure_schema().await?;
        Ok(client)
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            chats: ChatRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create the users and chats tables if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(schema::CREATE_USERS).execute(&self.pool).await?;
        sqlx::query(schema::CREATE_CHATS).execute(&self.pool).await?;
        sqlx::query(schema::CREATE_CHATS_USER_INDEX)
            .execute(&self.pool)
            .await?;
        tracing::debug!("schema ensured");
        Ok(())
    }

    pub fn users(&self) -> &UserRepository {
        &self.users
    }

    pub fn chats(&self) -> &ChatRepository {
        &self.chats
    }
}

#[async_trait]
impl PersistenceClient for PgPersistenceClient {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.users.find_by_email(email).await
    }

    async fn create_user(
        &self,
        email: &str,
        password_hash: Option<&str>,
        provider: Provider,
    ) -> Result<User> {
        self.users.create(email, password_hash, provider).await
    }

    async fn save_thread(&self, thread: &ChatThread) -> Result<()> {
        self.chats.save(thread).await
    }

    async fn threads_for_user(&self, user_id: &str) -> Result<Vec<ChatThread>> {
        self.chats.list_for_user(user_id).await
    }

    async fn get_thread(&self, thread_id: &str) -> Result<Option<ChatThread>> {
        self.chats.get(thread_id).await
    }

    async fn thread_owner(&self, thread_id: &str) -> Result<Option<String>> {
        self.chats.owner(thread_id).await
    }

    async fn delete_thread(&self, thread_id: &str) -> Result<()> {
        self.chats.delete(thread_id).await
    }
}
