use serde::{Deserialize, Serialize};

/// Column width of `users.name`. Longer names are cut at the storage boundary.
pub const USER_NAME_MAX_CHARS: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

impl User {
    /// Normalize a display name the way it is stored: truncated to the column width.
    pub fn storage_name(name: &str) -> &str {
        super::truncate_chars(name, USER_NAME_MAX_CHARS)
    }
    
    /// Case-folded lookup key; two names with the same key are the same user.
    pub fn name_key(name: &str) -> String {
        Self::storage_name(name).to_lowercase()
    }
}
