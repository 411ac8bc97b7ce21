use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::error::{ClientError, Result};
use crate::storage::{clear_session, TokenStore, TOKEN_KEY};

/// HTTP client for the FitCoach API.
///
/// Attaches the stored bearer token to every request. Any 401 response
/// clears the session from storage before surfacing the error, so a stale
/// token never survives a rejected call.
#[derive(Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, store: Arc<dyn TokenStore>) -> Result<Self> {
        let http_client = reqwest::Client::builder().build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            http_client,
            base_url,
            store,
        })
    }

    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T> {
        let body = serde_json::to_value(body)?;
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::DELETE, path, None).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http_client.request(method, &url);

        if let Some(token) = self.store.get(TOKEN_KEY)? {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let payload: Value = response.json().await.unwrap_or(Value::Null);

        if status == StatusCode::UNAUTHORIZED {
            clear_session(self.store.as_ref());
            return Err(ClientError::SessionExpired {
                message: error_message(&payload, status),
            });
        }
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(&payload, status),
            });
        }

        Ok(serde_json::from_value(payload)?)
    }
}

fn error_message(payload: &Value, status: StatusCode) -> String {
    payload
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status {status}"))
}
