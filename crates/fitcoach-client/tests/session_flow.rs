use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fitcoach_client::{
    ApiClient, AuthSession, ChatStore, MemoryTokenStore, TokenStore, TOKEN_KEY, USER_KEY,
};
use fitcoach_types::{ChatThread, Sender};

fn api(server_url: &str, store: Arc<MemoryTokenStore>) -> ApiClient {
    ApiClient::new(server_url, store).unwrap()
}

fn auth_body(user_id: Uuid, email: &str, token: &str) -> serde_json::Value {
    json!({
        "success": true,
        "data": {
            "token": token,
            "user": { "id": user_id, "email": email }
        }
    })
}

fn thread_body(thread: &ChatThread) -> serde_json::Value {
    serde_json::to_value(thread).unwrap()
}

#[tokio::test]
async fn login_persists_token_and_user() {
    let server = MockServer::start().await;
    let user_id = Uuid::new_v4();
    let token = fitcoach_auth::issue_token(&user_id.to_string(), "a@b.com", "secret").unwrap();

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body(user_id, "a@b.com", &token)))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let mut session = AuthSession::new(api(&server.uri(), store.clone()), store.clone());

    let flow = session.login("a@b.com", "pw123456").await;
    assert!(flow.is_fulfilled());
    assert!(session.is_authenticated());
    assert_eq!(session.user().unwrap().email, "a@b.com");

    assert_eq!(store.get(TOKEN_KEY).unwrap(), Some(token));
    let cached: serde_json::Value =
        serde_json::from_str(&store.get(USER_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(cached["email"], "a@b.com");
}

#[tokio::test]
async fn login_failure_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Invalid credentials"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let mut session = AuthSession::new(api(&server.uri(), store.clone()), store.clone());

    let flow = session.login("a@b.com", "wrong").await;
    assert_eq!(flow.error(), Some("Invalid credentials"));
    assert!(!session.is_authenticated());
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn initialize_restores_session_without_network() {
    let user_id = Uuid::new_v4();
    let token = fitcoach_auth::issue_token(&user_id.to_string(), "a@b.com", "secret").unwrap();

    let store = Arc::new(MemoryTokenStore::new());
    store.set(TOKEN_KEY, &token).unwrap();
    store
        .set(
            USER_KEY,
            &json!({ "id": user_id, "email": "a@b.com" }).to_string(),
        )
        .unwrap();

    // Unroutable base URL: a network call would fail the test.
    let mut session = AuthSession::new(api("http://localhost:0", store.clone()), store.clone());
    session.initialize();

    assert!(session.is_authenticated());
    assert_eq!(session.user().unwrap().email, "a@b.com");
}

#[tokio::test]
async fn initialize_clears_expired_session() {
    let user_id = Uuid::new_v4();
    let expired = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &json!({
            "id": user_id.to_string(),
            "email": "a@b.com",
            "exp": chrono::Utc::now().timestamp() - 3600,
        }),
        &jsonwebtoken::EncodingKey::from_secret(b"secret"),
    )
    .unwrap();

    let store = Arc::new(MemoryTokenStore::new());
    store.set(TOKEN_KEY, &expired).unwrap();
    store
        .set(
            USER_KEY,
            &json!({ "id": user_id, "email": "a@b.com" }).to_string(),
        )
        .unwrap();

    let mut session = AuthSession::new(api("http://localhost:0", store.clone()), store.clone());
    session.initialize();

    assert!(!session.is_authenticated());
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(store.get(USER_KEY).unwrap(), None);
}

#[tokio::test]
async fn fetch_history_replaces_the_thread_list() {
    let server = MockServer::start().await;
    let mut remote = ChatThread::new("user-1");
    remote.push_message(Sender::User, "Leg day plan");

    Mock::given(method("GET"))
        .and(path("/api/chat/history"))
        .and(query_param("user_id", "user-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "threads": [thread_body(&remote)]
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let mut chat = ChatStore::new(api(&server.uri(), store));
    chat.start_new_thread("user-1");
    assert_eq!(chat.threads().len(), 1);

    let flow = chat.fetch_history("user-1").await;
    assert!(flow.is_fulfilled());
    assert_eq!(chat.threads().len(), 1);
    assert_eq!(chat.threads()[0].id, remote.id);
    assert_eq!(chat.threads()[0].title, "Leg day plan");
}

#[tokio::test]
async fn save_thread_upserts_into_the_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/save"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let mut chat = ChatStore::new(api(&server.uri(), store));

    chat.start_new_thread("user-1");
    chat.add_message(Sender::User, "How many rest days per week?");

    let flow = chat.save_current().await;
    assert!(flow.is_fulfilled());
    assert_eq!(chat.threads().len(), 1);
    assert_eq!(chat.threads()[0].title, "How many rest days per week?");

    // A second save of the same thread updates in place.
    chat.add_message(Sender::Ai, "Two or three, depending on intensity.");
    let flow = chat.save_current().await;
    assert!(flow.is_fulfilled());
    assert_eq!(chat.threads().len(), 1);
    assert_eq!(chat.threads()[0].messages.len(), 2);
}

#[tokio::test]
async fn delete_clears_the_active_thread() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let mut chat = ChatStore::new(api(&server.uri(), store));

    chat.start_new_thread("user-1");
    let kept_id = chat.current_thread().unwrap().id.clone();
    chat.start_new_thread("user-1");
    let deleted_id = chat.current_thread().unwrap().id.clone();

    let flow = chat.delete_thread(&deleted_id).await;
    assert!(flow.is_fulfilled());
    assert!(chat.current_thread().is_none());
    assert_eq!(chat.threads().len(), 1);
    assert_eq!(chat.threads()[0].id, kept_id);
}

#[tokio::test]
async fn unauthorized_response_clears_the_stored_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat/history"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Invalid or expired token"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    store.set(TOKEN_KEY, "stale-token").unwrap();
    store.set(USER_KEY, "{}").unwrap();

    let mut chat = ChatStore::new(api(&server.uri(), store.clone()));
    let flow = chat.fetch_history("user-1").await;

    assert_eq!(flow.error(), Some("Invalid or expired token"));
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(store.get(USER_KEY).unwrap(), None);
}

#[tokio::test]
async fn logout_clears_locally_even_when_the_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "Internal server error"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    store.set(TOKEN_KEY, "tok").unwrap();
    store.set(USER_KEY, "{}").unwrap();

    let mut session = AuthSession::new(api(&server.uri(), store.clone()), store.clone());
    session.logout().await;

    assert!(!session.is_authenticated());
    assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    assert_eq!(store.get(USER_KEY).unwrap(), None);
}
