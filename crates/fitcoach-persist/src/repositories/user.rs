use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use fitcoach_types::{Provider, User};

use crate::error::{PersistError, Result};

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look up a user by exact email (case-sensitive, as stored).
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, provider, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_user).transpose()
    }

    /// Insert a new user. A `None` password hash marks an OAuth-only account.
    pub async fn create(
        &self,
        email: &str,
        password_hash: Option<&str>,
        provider: Provider,
    ) -> Result<User> {
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.map(str::to_string),
            provider,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO users (id, email, password_hash, provider, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(user.password_hash.as_deref())
        .bind(user.provider.as_str())
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                PersistError::DuplicateEmail(email.to_string())
            }
            _ => PersistError::Database(e),
        })?;

        Ok(user)
    }
}

fn row_to_user(row: PgRow) -> Result<User> {
    let provider_str: String = row.try_get("provider")?;
    let provider = Provider::parse(&provider_str)
        .ok_or_else(|| PersistError::InvalidRow(format!("unknown provider '{provider_str}'")))?;

    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        provider,
        created_at: row.try_get("created_at")?,
    })
}
