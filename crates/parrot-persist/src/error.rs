use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    
    #[error("Schema migration failed: {0}")]
    Migration(String),
    
    #[error("User not found: {0}")]
    UserNotFound(i64),
    
    #[error("Thread not found: {0}")]
    ThreadNotFound(i64),
    
    #[error("Connection error: {0}")]
    Connection(String),
    
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, PersistError>;
