//! High-level builder for wiring up a coaching client

use crate::{ApiClient, AuthSession, ChatStore, FileTokenStore, MemoryTokenStore, TokenStore};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Assembled client-side application: an authenticated session plus the
/// chat state that shares its token store.
pub struct CoachApp {
    pub auth: AuthSession,
    pub chat: ChatStore,
}

/// Builder for a [`CoachApp`].
///
/// # Example
///
/// ```rust,no_run
/// use fitcoach::prelude::*;
///
/// # #[tokio::main]
/// # async fn main() -> Result<()> {
/// let mut app = CoachAppBuilder::new("http://localhost:3000")
///     .session_file("/tmp/fitcoach-session.json")
///     .build()?;
///
/// app.auth.initialize();
/// if !app.auth.is_authenticated() {
///     app.auth.login("a@b.com", "password123").await;
/// }
/// # Ok(())
/// # }
/// ```
pub struct CoachAppBuilder {
    base_url: String,
    session_file: Option<PathBuf>,
}

impl CoachAppBuilder {
    /// Create a builder pointed at an API server.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            session_file: None,
        }
    }

    /// Persist the session token and cached user to a JSON file, so a
    /// restarted app resumes without logging in again. Without this the
    /// session lives in memory only.
    pub fn session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    pub fn build(self) -> Result<CoachApp> {
        let store: Arc<dyn TokenStore> = match self.session_file {
            Some(path) => Arc::new(FileTokenStore::new(path)),
            None => Arc::new(MemoryTokenStore::new()),
        };

        let api = ApiClient::new(&self.base_url, store.clone())
            .context("failed to build API client")?;

        Ok(CoachApp {
            auth: AuthSession::new(api.clone(), store),
            chat: ChatStore::new(api),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_in_memory_store_by_default() {
        let app = CoachAppBuilder::new("http://localhost:3000").build().unwrap();
        assert!(!app.auth.is_authenticated());
        assert!(app.chat.threads().is_empty());
    }

    #[test]
    fn builds_with_a_session_file() {
        let dir = std::env::temp_dir();
        let app = CoachAppBuilder::new("http://localhost:3000/")
            .session_file(dir.join("fitcoach-session.json"))
            .build()
            .unwrap();
        assert!(!app.auth.is_authenticated());
    }
}
