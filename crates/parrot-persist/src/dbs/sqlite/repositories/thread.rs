use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};

use crate::dbs::sqlite::models::SqliteThread;
use crate::error::Result;

const THREAD_COLUMNS: &str = "id, title, created_at, user_id";

#[derive(Clone)]
pub struct SqliteThreadRepository {
    pool: SqlitePool,
}

impl SqliteThreadRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
    
    /// Insert a new thread inside an open transaction
    pub async fn create_thread(
        conn: &mut SqliteConnection,
        title: &str,
        user_id: i64,
        created_at: DateTime<Utc>,
    ) -> Result<SqliteThread> {
        let id = sqlx::query("INSERT INTO threads (title, created_at, user_id) VALUES (?, ?, ?)")
            .bind(title)
            .bind(created_at)
            .bind(user_id)
            .execute(conn)
            .await?
            .last_insert_rowid();
        
        Ok(SqliteThread {
            id,
            title: title.to_string(),
            created_at,
            user_id,
        })
    }
    
    /// Get thread by ID, scoped to its owner
    pub async fn get_thread(&self, thread_id: i64, user_id: i64) -> Result<Option<SqliteThread>> {
        let query = format!("SELECT {THREAD_COLUMNS} FROM threads WHERE id = ? AND user_id = ?");
        let thread = sqlx::query_as::<_, SqliteThread>(&query)
            .bind(thread_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(thread)
    }
    
    /// Same as [`get_thread`](Self::get_thread) but on a transaction's connection
    pub async fn find_owned(
        conn: &mut SqliteConnection,
        thread_id: i64,
        user_id: i64,
    ) -> Result<Option<SqliteThread>> {
        let query = format!("SELECT {THREAD_COLUMNS} FROM threads WHERE id = ? AND user_id = ?");
        let thread = sqlx::query_as::<_, SqliteThread>(&query)
            .bind(thread_id)
            .bind(user_id)
            .fetch_optional(conn)
            .await?;
        Ok(thread)
    }
    
    /// List threads for a user in creation order
    pub async fn list_threads(&self, user_id: i64) -> Result<Vec<SqliteThread>> {
        let query = format!("SELECT {THREAD_COLUMNS} FROM threads WHERE user_id = ? ORDER BY id");
        let threads = sqlx::query_as::<_, SqliteThread>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(threads)
    }
    
    /// Delete thread; its messages are removed by the `ON DELETE CASCADE` foreign key
    pub async fn delete_thread(&self, thread_id: i64, user_id: i64) -> Result<bool> {
        let affected = sqlx::query("DELETE FROM threads WHERE id = ? AND user_id = ?")
            .bind(thread_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}
