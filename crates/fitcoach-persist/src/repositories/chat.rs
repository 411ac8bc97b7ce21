use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use fitcoach_types::{ChatMessage, ChatThread};

use crate::error::Result;

#[derive(Clone)]
pub struct ChatRepository {
    pool: PgPool,
}

impl ChatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert a thread by id.
    ///
    /// The conflict path overwrites title, messages and updated_at only;
    /// user_id and created_at keep their insert-time values.
    pub async fn save(&self, thread: &ChatThread) -> Result<()> {
        sqlx::query(
            "INSERT INTO chats (id, user_id, title, messages, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (id) DO UPDATE SET \
                 title = EXCLUDED.title, \
                 messages = EXCLUDED.messages, \
                 updated_at = EXCLUDED.updated_at",
        )
        .bind(&thread.id)
        .bind(&thread.user_id)
        .bind(&thread.title)
        .bind(Json(&thread.messages))
        .bind(thread.created_at)
        .bind(thread.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All threads for a user, most recently updated first.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<ChatThread>> {
        let rows = sqlx::query(
            "SELECT id, user_id, title, messages, created_at, updated_at \
             FROM chats WHERE user_id = $1 ORDER BY updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_thread).collect()
    }

    pub async fn get(&self, thread_id: &str) -> Result<Option<ChatThread>> {
        let row = sqlx::query(
            "SELECT id, user_id, title, messages, created_at, updated_at \
             FROM chats WHERE id = $1",
        )
        .bind(thread_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_thread).transpose()
    }

    /// Owner of a thread, or `None` when the thread does not exist.
    pub async fn owner(&self, thread_id: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT user_id FROM chats WHERE id = $1")
            .bind(thread_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get("user_id")))
    }

    /// Delete a thread and its embedded messages. Idempotent: deleting an
    /// absent id is not an error.
    pub async fn delete(&self, thread_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM chats WHERE id = $1")
            .bind(thread_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn row_to_thread(row: PgRow) -> Result<ChatThread> {
    let Json(messages): Json<Vec<ChatMessage>> = row.try_get("messages")?;

    Ok(ChatThread {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        title: row.try_get("title")?,
        messages,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
