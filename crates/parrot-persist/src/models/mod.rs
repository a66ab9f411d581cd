mod db_message;
mod db_thread;
mod db_user;

// Export database-agnostic models
pub use db_message::{DBMessage, Exchange, NewExchange};
pub use db_thread::{Thread, THREAD_TITLE_MAX_CHARS};
pub use db_user::{User, USER_NAME_MAX_CHARS};

/// Keep at most `max` characters of `text`, counting Unicode scalar values.
pub(crate) fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
