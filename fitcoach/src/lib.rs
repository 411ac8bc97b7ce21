//! # FitCoach - AI Fitness Coaching Toolkit for Rust
//!
//! FitCoach provides everything needed to run or talk to an AI fitness
//! coaching service:
//! - 🔐 **Authentication** (email/password and Google sign-in, stateless JWT sessions)
//! - 💬 **Chat threads** (client-generated ids, auto-titled, upserted by id)
//! - 🤖 **Coaching replies** (Gemini-backed, profile-aware prompts)
//! - 💾 **Persistence** (PostgreSQL with JSONB message storage)
//! - ⚡ **Async/await** (built on Tokio)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fitcoach::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut app = CoachAppBuilder::new("http://localhost:3000")
//!         .session_file("/tmp/fitcoach-session.json")
//!         .build()?;
//!
//!     // Restore a cached session if one exists, otherwise log in.
//!     app.auth.initialize();
//!     if !app.auth.is_authenticated() {
//!         app.auth.login("a@b.com", "password123").await;
//!     }
//!
//!     let user_id = app.auth.user().unwrap().id.to_string();
//!     app.chat.fetch_history(&user_id).await;
//!     for thread in app.chat.threads() {
//!         println!("{}", thread.title);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! FitCoach consists of several composable crates:
//!
//! - **fitcoach-types**: Core domain types (users, chat threads, fitness profiles)
//! - **fitcoach-auth**: Password hashing, JWT issue/verify, Google token verification
//! - **fitcoach-persist**: PostgreSQL persistence behind a trait seam
//! - **fitcoach-llm**: Gemini client and coaching prompt construction
//! - **fitcoach-client**: Session and chat state orchestration over the HTTP API
//!
//! The HTTP server itself lives in the `fitcoach-api` binary crate in the
//! repository.

// Re-export all public APIs
pub use fitcoach_auth as auth;
pub use fitcoach_client as client;
pub use fitcoach_llm as llm;
pub use fitcoach_persist as persist;
pub use fitcoach_types as types;

// Re-export commonly used types
pub use fitcoach_auth::{Claims, GoogleTokenVerifier, IdTokenVerifier};
pub use fitcoach_client::{
    ApiClient, AuthSession, ChatStore, FileTokenStore, FlowState, MemoryTokenStore, TokenStore,
};
pub use fitcoach_llm::{CoachClient, GeminiClient};
pub use fitcoach_persist::{PersistenceClient, PgPersistenceClient};
pub use fitcoach_types::{ChatMessage, ChatThread, FitnessProfile, PublicUser, Sender, User};

/// High-level builder for wiring up a coaching client
pub mod builder;

/// Convenient prelude with commonly used types
pub mod prelude {
    pub use crate::builder::{CoachApp, CoachAppBuilder};
    pub use crate::client::FlowState;
    pub use crate::types::{ChatMessage, ChatThread, PublicUser, Sender};
    pub use anyhow::Result;
}
