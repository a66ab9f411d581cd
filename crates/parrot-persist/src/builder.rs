use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::SqlitePersistenceClient;
use crate::error::{Result, PersistError};

const IN_MEMORY_URL: &str = "sqlite::memory:";

pub struct PersistClientBuilder {
    database_url: Option<String>,
    max_connections: u32,
    acquire_timeout: Duration,
    in_memory: bool,
}

impl PersistClientBuilder {
    pub fn new() -> Self {
        Self {
            database_url: None,
            max_connections: 5,
            acquire_timeout: Duration::from_secs(3),
            in_memory: false,
        }
    }
    
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }
    
    pub fn max_connections(mut self, connections: u32) -> Self {
        self.max_connections = connections;
        self
    }
    
    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }
    
    /// Use a private in-memory database. The pool is pinned to a single
    /// connection that never expires, otherwise the data would vanish with it.
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }
    
    pub async fn build(self) -> Result<SqlitePersistenceClient> {
        let pool = if self.in_memory {
            let options = SqliteConnectOptions::from_str(IN_MEMORY_URL)
                .map_err(|e| PersistError::Connection(e.to_string()))?
                .foreign_keys(true);
            
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
                .acquire_timeout(self.acquire_timeout)
                .connect_with(options)
                .await
                .map_err(|e| PersistError::Connection(e.to_string()))?
        } else {
            let database_url = self.database_url
                .ok_or_else(|| PersistError::Internal("database_url is required".to_string()))?;
            
            let options = SqliteConnectOptions::from_str(&database_url)
                .map_err(|e| PersistError::Connection(format!("invalid database url: {}", e)))?
                .create_if_missing(true)
                .foreign_keys(true)
                .journal_mode(SqliteJournalMode::Wal);
            
            SqlitePoolOptions::new()
                .max_connections(self.max_connections.max(1))
                .acquire_timeout(self.acquire_timeout)
                .connect_with(options)
                .await
                .map_err(|e| PersistError::Connection(e.to_string()))?
        };
        
        SqlitePersistenceClient::from_pool(pool).await
    }
}

impl Default for PersistClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
