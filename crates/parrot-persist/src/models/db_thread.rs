use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Column width of `threads.title`.
pub const THREAD_TITLE_MAX_CHARS: usize = 100;

/// Database-agnostic thread model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
}
