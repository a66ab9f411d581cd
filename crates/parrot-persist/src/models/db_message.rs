use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use super::Thread;

/// Database-agnostic message model
///
/// `response_to_id` only carries the id of the message being replied to;
/// resolve it with another lookup when the parent is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DBMessage {
    pub id: i64,
    pub message: String,
    pub user_id: i64,
    pub thread_id: i64,
    pub timestamp: DateTime<Utc>,
    pub response_to_id: Option<i64>,
}

impl DBMessage {
    pub fn is_reply(&self) -> bool {
        self.response_to_id.is_some()
    }
}

/// One user turn plus the chatbot's reply, written atomically.
#[derive(Debug, Clone)]
pub struct NewExchange {
    pub user_id: i64,
    /// Existing thread to append to; `None` starts a new thread titled `title`.
    pub thread_id: Option<i64>,
    pub title: String,
    pub user_text: String,
    pub reply_text: String,
}

/// Rows persisted by a single exchange.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub thread: Thread,
    pub user_message: DBMessage,
    pub reply: DBMessage,
}
