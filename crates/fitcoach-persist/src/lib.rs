pub mod client;
pub mod error;
pub mod repositories;
pub mod schema;
pub mod trait_client;

pub use client::PgPersistenceClient;
pub use error::PersistError;
pub use repositories::{ChatRepository, UserRepository};
pub use trait_client::PersistenceClient;
