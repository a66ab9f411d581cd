use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::trait_client::PersistenceClient;
use crate::models::{truncate_chars, DBMessage, Exchange, NewExchange, Thread, User, THREAD_TITLE_MAX_CHARS};
use crate::dbs::sqlite::repositories::{
    SqliteMessageRepository, SqliteThreadRepository, SqliteUserRepository,
};
use crate::dbs::sqlite::schema;
use crate::error::{PersistError, Result};

pub struct SqlitePersistenceClient {
    pool: SqlitePool,
    user_repo: SqliteUserRepository,
    thread_repo: SqliteThreadRepository,
    message_repo: SqliteMessageRepository,
}

impl SqlitePersistenceClient {
    /// Wrap an existing pool and make sure the schema exists
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        schema::migrate(&pool).await?;
        
        Ok(Self {
            user_repo: SqliteUserRepository::new(pool.clone()),
            thread_repo: SqliteThreadRepository::new(pool.clone()),
            message_repo: SqliteMessageRepository::new(pool.clone()),
            pool,
        })
    }
    
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl PersistenceClient for SqlitePersistenceClient {
    async fn find_or_create_user(&self, name: &str) -> Result<User> {
        Ok(self.user_repo.upsert_by_name(name).await?.into())
    }
    
    async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        Ok(self.user_repo.get_user(user_id).await?.map(|u| u.into()))
    }
    
    async fn list_threads(&self, user_id: i64) -> Result<Vec<Thread>> {
        let threads = self.thread_repo.list_threads(user_id).await?;
        Ok(threads.into_iter().map(|t| t.into()).collect())
    }
    
    async fn get_thread(&self, thread_id: i64, user_id: i64) -> Result<Option<Thread>> {
        Ok(self.thread_repo.get_thread(thread_id, user_id).await?.map(|t| t.into()))
    }
    
    async fn get_messages(&self, thread_id: i64) -> Result<Vec<DBMessage>> {
        let messages = self.message_repo.get_messages(thread_id).await?;
        Ok(messages.into_iter().map(|m| m.into()).collect())
    }
    
    async fn record_exchange(&self, exchange: NewExchange) -> Result<Exchange> {
        let NewExchange { user_id, thread_id, title, user_text, reply_text } = exchange;
        
        // Take the write lock up front so concurrent senders queue on the
        // busy timeout instead of failing a read-to-write upgrade.
        // Dropping `tx` on any early return rolls everything back.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        
        if !SqliteUserRepository::exists(&mut tx, user_id).await? {
            return Err(PersistError::UserNotFound(user_id));
        }
        
        let thread = match thread_id {
            Some(id) => SqliteThreadRepository::find_owned(&mut tx, id, user_id)
                .await?
                .ok_or(PersistError::ThreadNotFound(id))?,
            None => {
                let title = truncate_chars(&title, THREAD_TITLE_MAX_CHARS);
                SqliteThreadRepository::create_thread(&mut tx, title, user_id, Utc::now()).await?
            }
        };
        
        let user_message =
            SqliteMessageRepository::save_message(&mut tx, &user_text, user_id, thread.id, None)
                .await?;
        let reply = SqliteMessageRepository::save_message(
            &mut tx,
            &reply_text,
            user_id,
            thread.id,
            Some(user_message.id),
        )
        .await?;
        
        tx.commit().await?;
        
        tracing::debug!(
            thread_id = thread.id,
            user_message_id = user_message.id,
            reply_id = reply.id,
            "Recorded exchange"
        );
        
        Ok(Exchange {
            thread: thread.into(),
            user_message: user_message.into(),
            reply: reply.into(),
        })
    }
    
    async fn delete_thread(&self, thread_id: i64, user_id: i64) -> Result<bool> {
        self.thread_repo.delete_thread(thread_id, user_id).await
    }
    
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
