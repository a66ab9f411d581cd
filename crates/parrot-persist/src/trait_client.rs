use async_trait::async_trait;

use crate::models::{DBMessage, Exchange, NewExchange, Thread, User};
use crate::error::Result;

/// Trait for database persistence operations
/// 
/// Implementations provide database-specific CRUD operations. Handlers only
/// ever see this trait, so a request never reaches a process-wide connection.
#[async_trait]
pub trait PersistenceClient: Send + Sync {
    /// Resolve a user by case-insensitive name, creating it on first sight
    async fn find_or_create_user(&self, name: &str) -> Result<User>;
    
    /// Get a user by ID
    async fn get_user(&self, user_id: i64) -> Result<Option<User>>;
    
    /// List threads owned by a user, oldest first
    async fn list_threads(&self, user_id: i64) -> Result<Vec<Thread>>;
    
    /// Get a thread by ID, only if `user_id` owns it
    async fn get_thread(&self, thread_id: i64, user_id: i64) -> Result<Option<Thread>>;
    
    /// Get all messages for a thread, oldest first
    async fn get_messages(&self, thread_id: i64) -> Result<Vec<DBMessage>>;
    
    /// Persist a user message and its reply (creating the thread if needed) in one transaction
    async fn record_exchange(&self, exchange: NewExchange) -> Result<Exchange>;
    
    /// Delete a thread owned by `user_id` together with its messages.
    /// Returns `false` when nothing matched.
    async fn delete_thread(&self, thread_id: i64, user_id: i64) -> Result<bool>;
    
    /// Cheap round-trip used by health checks
    async fn ping(&self) -> Result<()>;
}
