use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use fitcoach_auth::inspect_claims;
use fitcoach_types::PublicUser;

use crate::api::ApiClient;
use crate::error::Result;
use crate::flow::FlowState;
use crate::storage::{clear_session, TokenStore, TOKEN_KEY, USER_KEY};

#[derive(Debug, Deserialize)]
struct AuthData {
    token: String,
    user: PublicUser,
}

#[derive(Debug, Deserialize)]
struct AuthEnvelope {
    #[allow(dead_code)]
    success: bool,
    data: AuthData,
}

/// Client-side authentication state machine.
///
/// Mirrors the server's session lifecycle: a session exists exactly when a
/// structurally valid, unexpired token plus a cached user record are in the
/// store.
pub struct AuthSession {
    api: ApiClient,
    store: Arc<dyn TokenStore>,
    user: Option<PublicUser>,
    authenticated: bool,
    flow: FlowState<PublicUser>,
}

impl AuthSession {
    pub fn new(api: ApiClient, store: Arc<dyn TokenStore>) -> Self {
        Self {
            api,
            store,
            user: None,
            authenticated: false,
            flow: FlowState::Idle,
        }
    }

    pub fn user(&self) -> Option<&PublicUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn flow(&self) -> &FlowState<PublicUser> {
        &self.flow
    }

    /// Restore a session from storage without a network call.
    ///
    /// The token is validated structurally (three segments, decodable
    /// payload, unexpired `exp`); anything invalid or missing clears the
    /// store and leaves the session unauthenticated.
    pub fn initialize(&mut self) {
        let token = self.store.get(TOKEN_KEY).ok().flatten();
        let cached_user = self.store.get(USER_KEY).ok().flatten();

        if let (Some(token), Some(cached_user)) = (token, cached_user) {
            let user: Option<PublicUser> = serde_json::from_str(&cached_user).ok();
            if let (Ok(_claims), Some(user)) = (inspect_claims(&token), user) {
                self.user = Some(user);
                self.authenticated = true;
                return;
            }
        }

        clear_session(self.store.as_ref());
        self.user = None;
        self.authenticated = false;
    }

    pub async fn login(&mut self, email: &str, password: &str) -> &FlowState<PublicUser> {
        let body = json!({ "email": email, "password": password });
        self.run_auth_flow("/api/auth/login", body).await
    }

    pub async fn signup(&mut self, email: &str, password: &str) -> &FlowState<PublicUser> {
        let body = json!({ "email": email, "password": password });
        self.run_auth_flow("/api/auth/signup", body).await
    }

    pub async fn google_login(&mut self, id_token: &str) -> &FlowState<PublicUser> {
        let body = json!({ "id_token": id_token });
        self.run_auth_flow("/api/auth/google", body).await
    }

    /// Best-effort server call; the local session is cleared regardless of
    /// the outcome.
    pub async fn logout(&mut self) {
        if let Err(e) = self
            .api
            .post::<serde_json::Value>("/api/auth/logout", &json!({}))
            .await
        {
            tracing::debug!("logout request failed: {}", e);
        }

        clear_session(self.store.as_ref());
        self.user = None;
        self.authenticated = false;
        self.flow = FlowState::Idle;
    }

    async fn run_auth_flow(
        &mut self,
        path: &str,
        body: serde_json::Value,
    ) -> &FlowState<PublicUser> {
        self.flow = FlowState::Pending;

        let result: Result<AuthEnvelope> = self.api.post(path, &body).await;
        match result {
            Ok(envelope) => {
                let AuthData { token, user } = envelope.data;
                if let Err(e) = self.persist_session(&token, &user) {
                    tracing::warn!("failed to persist session: {}", e);
                }
                self.user = Some(user.clone());
                self.authenticated = true;
                self.flow = FlowState::Fulfilled(user);
            }
            Err(e) => {
                self.user = None;
                self.authenticated = false;
                self.flow = FlowState::Rejected(e.message());
            }
        }

        &self.flow
    }

    fn persist_session(&self, token: &str, user: &PublicUser) -> Result<()> {
        self.store.set(TOKEN_KEY, token)?;
        self.store.set(USER_KEY, &serde_json::to_string(user)?)?;
        Ok(())
    }
}
