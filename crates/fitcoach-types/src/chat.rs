use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to a thread before the first user message arrives.
pub const DEFAULT_THREAD_TITLE: &str = "New Chat";

/// Maximum characters kept when deriving a title from the first user message.
pub const TITLE_MAX_CHARS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// A single chat message. Immutable once created; threads only ever append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: format!("msg_{}", Uuid::new_v4().simple()),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A chat thread as stored and sent over the wire.
///
/// Ids are client-generated stable strings; the server upserts by id.
/// The `createdAt`/`updatedAt` wire names match the persisted record format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatThread {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl ChatThread {
    /// Create an empty thread owned by `user_id` with the default title.
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: format!("thread_{}", Uuid::new_v4().simple()),
            user_id: user_id.into(),
            title: DEFAULT_THREAD_TITLE.to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a message, stamp `updated_at`, and derive the title from the
    /// first user-authored message while the title is still the default.
    pub fn push_message(&mut self, sender: Sender, text: impl Into<String>) -> &ChatMessage {
        let message = ChatMessage::new(sender, text);
        self.updated_at = message.timestamp;
        if sender == Sender::User && self.title == DEFAULT_THREAD_TITLE {
            self.title = derive_title(&message.text);
        }
        self.messages.push(message);
        self.messages.last().expect("just pushed")
    }
}

/// First `TITLE_MAX_CHARS` characters of the message, with `"..."` appended
/// when the message was longer.
pub fn derive_title(text: &str) -> String {
    let mut title: String = text.chars().take(TITLE_MAX_CHARS).collect();
    if text.chars().count() > TITLE_MAX_CHARS {
        title.push_str("...");
    }
    title
}
