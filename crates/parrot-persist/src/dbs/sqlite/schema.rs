use sqlx::SqlitePool;

use crate::error::{PersistError, Result};

/// Idempotent DDL, applied in order on every startup.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        name_key TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS threads (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        created_at TEXT NOT NULL,
        user_id INTEGER NOT NULL REFERENCES users(id)
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_threads_user_id
    ON threads(user_id)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS messages (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        message TEXT NOT NULL,
        user_id INTEGER NOT NULL REFERENCES users(id),
        thread_id INTEGER NOT NULL REFERENCES threads(id) ON DELETE CASCADE,
        timestamp TEXT NOT NULL,
        response_to_id INTEGER REFERENCES messages(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_messages_thread_id
    ON messages(thread_id, id)
    "#,
];

pub(crate) async fn migrate(pool: &SqlitePool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| PersistError::Migration(e.to_string()))?;
    }
    
    tracing::debug!(statements = SCHEMA.len(), "SQLite schema ready");
    Ok(())
}
