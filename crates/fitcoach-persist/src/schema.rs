//! Schema DDL applied at startup. Idempotent; safe to run on every boot.

pub const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT,
    provider TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
)
"#;

pub const CREATE_CHATS: &str = r#"
CREATE TABLE IF NOT EXISTS chats (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    title TEXT NOT NULL,
    messages JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
)
"#;

pub const CREATE_CHATS_USER_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS chats_user_updated_idx
    ON chats (user_id, updated_at DESC)
"#;
