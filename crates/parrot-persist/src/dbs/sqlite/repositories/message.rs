use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use crate::dbs::sqlite::models::SqliteMessage;
use crate::error::Result;

#[derive(Clone)]
pub struct SqliteMessageRepository {
    pool: SqlitePool,
}

impl SqliteMessageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
    
    /// Insert a message inside an open transaction, timestamped now
    pub async fn save_message(
        conn: &mut SqliteConnection,
        message: &str,
        user_id: i64,
        thread_id: i64,
        response_to_id: Option<i64>,
    ) -> Result<SqliteMessage> {
        let timestamp = Utc::now();
        let id = sqlx::query(
            "INSERT INTO messages (message, user_id, thread_id, timestamp, response_to_id) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(message)
        .bind(user_id)
        .bind(thread_id)
        .bind(timestamp)
        .bind(response_to_id)
        .execute(conn)
        .await?
        .last_insert_rowid();
        
        Ok(SqliteMessage {
            id,
            message: message.to_string(),
            user_id,
            thread_id,
            timestamp,
            response_to_id,
        })
    }
    
    /// Get all messages for a thread in insertion order
    pub async fn get_messages(&self, thread_id: i64) -> Result<Vec<SqliteMessage>> {
        let messages = sqlx::query_as::<_, SqliteMessage>(
            "SELECT id, message, user_id, thread_id, timestamp, response_to_id \
             FROM messages WHERE thread_id = ? ORDER BY id",
        )
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }
}
