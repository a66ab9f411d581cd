use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::{DBMessage, Thread, User};

/// Row shape of `users`
#[derive(Debug, Clone, FromRow)]
pub struct SqliteUser {
    pub id: i64,
    pub name: String,
}

/// Row shape of `threads`
#[derive(Debug, Clone, FromRow)]
pub struct SqliteThread {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
}

/// Row shape of `messages`
#[derive(Debug, Clone, FromRow)]
pub struct SqliteMessage {
    pub id: i64,
    pub message: String,
    pub user_id: i64,
    pub thread_id: i64,
    pub timestamp: DateTime<Utc>,
    pub response_to_id: Option<i64>,
}

// Conversions from SQLite rows to database-agnostic models

impl From<SqliteUser> for User {
    fn from(row: SqliteUser) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

impl From<SqliteThread> for Thread {
    fn from(row: SqliteThread) -> Self {
        Self {
            id: row.id,
            title: row.title,
            created_at: row.created_at,
            user_id: row.user_id,
        }
    }
}

impl From<SqliteMessage> for DBMessage {
    fn from(row: SqliteMessage) -> Self {
        Self {
            id: row.id,
            message: row.message,
            user_id: row.user_id,
            thread_id: row.thread_id,
            timestamp: row.timestamp,
            response_to_id: row.response_to_id,
        }
    }
}
