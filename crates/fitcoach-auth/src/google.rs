use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{AuthError, Result};

const GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// A verified third-party identity: the only claim this system uses is the
/// email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub email: String,
}

/// Trait for verifying OAuth ID tokens.
///
/// The API server holds this as `Arc<dyn IdTokenVerifier>` so tests can
/// substitute a stub verifier.
#[async_trait]
pub trait IdTokenVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity>;
}

/// Verifies Google ID tokens against the tokeninfo endpoint.
///
/// Google validates the signature and expiry server-side; we additionally
/// check the audience against our configured OAuth client id.
pub struct GoogleTokenVerifier {
    http_client: reqwest::Client,
    endpoint: String,
    client_id: String,
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    email: Option<String>,
}

impl GoogleTokenVerifier {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            endpoint: GOOGLE_TOKENINFO_URL.to_string(),
            client_id: client_id.into(),
        }
    }

    /// Point the verifier at a different endpoint (tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl IdTokenVerifier for GoogleTokenVerifier {
    async fn verify(&self, id_token: &str) -> Result<VerifiedIdentity> {
        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| AuthError::GoogleVerification(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::GoogleVerification(format!(
                "tokeninfo returned {}",
                response.status()
            )));
        }

        let info: TokenInfo = response
            .json()
            .await
            .map_err(|e| AuthError::GoogleVerification(e.to_string()))?;

        if info.aud != self.client_id {
            return Err(AuthError::GoogleVerification("audience mismatch".into()));
        }

        let email = info.email.ok_or(AuthError::MissingEmailClaim)?;
        Ok(VerifiedIdentity { email })
    }
}
