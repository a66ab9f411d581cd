pub mod models;
pub mod dbs;
pub mod error;
pub mod builder;
pub mod trait_client;

pub use models::{
    DBMessage, Exchange, NewExchange, Thread, User, THREAD_TITLE_MAX_CHARS, USER_NAME_MAX_CHARS,
};
pub use dbs::sqlite::SqlitePersistenceClient;
pub use error::{PersistError, Result};
pub use builder::PersistClientBuilder;
pub use trait_client::PersistenceClient;
