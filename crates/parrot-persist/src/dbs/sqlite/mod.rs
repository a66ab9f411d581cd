pub mod client;
pub mod models;
pub mod repositories;
mod schema;

pub use client::SqlitePersistenceClient;
