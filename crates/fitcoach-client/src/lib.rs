pub mod api;
pub mod auth;
pub mod chat;
pub mod error;
pub mod flow;
pub mod storage;

pub use api::ApiClient;
pub use auth::AuthSession;
pub use chat::ChatStore;
pub use error::ClientError;
pub use flow::FlowState;
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore, TOKEN_KEY, USER_KEY};
