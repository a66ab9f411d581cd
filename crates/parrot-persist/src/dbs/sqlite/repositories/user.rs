use sqlx::{SqliteConnection, SqlitePool};

use crate::dbs::sqlite::models::SqliteUser;
use crate::error::Result;
use crate::User;

#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
    
    /// Insert the user unless one with the same case-folded name exists,
    /// then return whichever row owns that name.
    ///
    /// The unique `name_key` column makes this safe under concurrent sign-ins.
    pub async fn upsert_by_name(&self, name: &str) -> Result<SqliteUser> {
        let stored_name = User::storage_name(name);
        let name_key = User::name_key(name);
        
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        
        let inserted = sqlx::query(
            "INSERT INTO users (name, name_key) VALUES (?, ?) ON CONFLICT(name_key) DO NOTHING",
        )
        .bind(stored_name)
        .bind(&name_key)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        
        let user = sqlx::query_as::<_, SqliteUser>("SELECT id, name FROM users WHERE name_key = ?")
            .bind(&name_key)
            .fetch_one(&mut *tx)
            .await?;
        
        tx.commit().await?;
        
        if inserted > 0 {
            tracing::info!(user_id = user.id, "Created user");
        }
        Ok(user)
    }
    
    /// Get user by ID
    pub async fn get_user(&self, user_id: i64) -> Result<Option<SqliteUser>> {
        let user = sqlx::query_as::<_, SqliteUser>("SELECT id, name FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
    
    /// Existence check usable inside an open transaction
    pub async fn exists(conn: &mut SqliteConnection, user_id: i64) -> Result<bool> {
        let found = sqlx::query("SELECT 1 FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(conn)
            .await?;
        Ok(found.is_some())
    }
}
