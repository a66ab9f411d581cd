use std::sync::Arc;

use parrot_bot::ReplyGenerator;
use parrot_persist::{DBMessage, Exchange, NewExchange, PersistenceClient, Thread, User};

use crate::error::{ApiError, ApiResult};

/// New threads are titled with this many leading characters of their first message.
pub const THREAD_TITLE_CHARS: usize = 50;

pub fn thread_title(message: &str) -> String {
    message.chars().take(THREAD_TITLE_CHARS).collect()
}

/// Request-level chat operations on top of persistence and the reply policy
pub struct ChatService {
    persist: Arc<dyn PersistenceClient>,
    replies: Arc<dyn ReplyGenerator>,
}

impl ChatService {
    pub fn new(persist: Arc<dyn PersistenceClient>, replies: Arc<dyn ReplyGenerator>) -> Self {
        Self { persist, replies }
    }
    
    /// Resolve a display name to a user, creating it on first sign-in
    pub async fn sign_in(&self, name: &str) -> ApiResult<User> {
        if name.trim().is_empty() {
            return Err(ApiError::Validation("name must not be blank".to_string()));
        }
        Ok(self.persist.find_or_create_user(name).await?)
    }
    
    pub async fn current_user(&self, user_id: i64) -> ApiResult<User> {
        self.persist
            .get_user(user_id)
            .await?
            .ok_or(ApiError::UserNotFound(user_id))
    }
    
    pub async fn list_threads(&self, user_id: i64) -> ApiResult<Vec<Thread>> {
        Ok(self.persist.list_threads(user_id).await?)
    }
    
    /// Conversation history of a thread owned by `user_id`.
    ///
    /// A thread without messages is reported as not found.
    pub async fn thread_messages(&self, thread_id: i64, user_id: i64) -> ApiResult<Vec<DBMessage>> {
        self.persist
            .get_thread(thread_id, user_id)
            .await?
            .ok_or(ApiError::ThreadNotFound(thread_id))?;
        
        let messages = self.persist.get_messages(thread_id).await?;
        if messages.is_empty() {
            return Err(ApiError::NoMessages(thread_id));
        }
        Ok(messages)
    }
    
    /// Store `message` and the chatbot's reply, starting a new thread when
    /// `thread_id` is `None`.
    pub async fn send_message(
        &self,
        user_id: i64,
        message: &str,
        thread_id: Option<i64>,
    ) -> ApiResult<Exchange> {
        let reply_text = self.replies.reply(message);
        
        let exchange = self
            .persist
            .record_exchange(NewExchange {
                user_id,
                thread_id,
                title: thread_title(message),
                user_text: message.to_string(),
                reply_text,
            })
            .await?;
        
        tracing::info!(
            user_id,
            thread_id = exchange.thread.id,
            new_thread = thread_id.is_none(),
            "Message exchanged"
        );
        Ok(exchange)
    }
    
    pub async fn delete_thread(&self, thread_id: i64, user_id: i64) -> ApiResult<()> {
        if self.persist.delete_thread(thread_id, user_id).await? {
            tracing::info!(user_id, thread_id, "Thread deleted");
            Ok(())
        } else {
            Err(ApiError::ThreadNotFound(thread_id))
        }
    }
    
    /// Whether the database answers
    pub async fn database_healthy(&self) -> bool {
        match self.persist.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Database ping failed: {}", e);
                false
            }
        }
    }
}
