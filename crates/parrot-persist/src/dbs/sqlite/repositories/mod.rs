mod message;
mod thread;
mod user;

pub use message::SqliteMessageRepository;
pub use thread::SqliteThreadRepository;
pub use user::SqliteUserRepository;
