use serde::Deserialize;

use fitcoach_types::{ChatMessage, ChatThread, Sender};

use crate::api::ApiClient;
use crate::flow::FlowState;

#[derive(Debug, Deserialize)]
struct HistoryEnvelope {
    #[allow(dead_code)]
    success: bool,
    threads: Vec<ChatThread>,
}

/// Client-side chat state: the thread list, the active thread, and the
/// local-only mutations that never touch the network.
///
/// The active thread is the authoritative copy while the user is chatting;
/// its entry in the list catches up on the next successful save.
pub struct ChatStore {
    api: ApiClient,
    threads: Vec<ChatThread>,
    current: Option<ChatThread>,
    new_chat_mode: bool,
    flow: FlowState<()>,
}

impl ChatStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            threads: Vec::new(),
            current: None,
            new_chat_mode: false,
            flow: FlowState::Idle,
        }
    }

    pub fn threads(&self) -> &[ChatThread] {
        &self.threads
    }

    pub fn current_thread(&self) -> Option<&ChatThread> {
        self.current.as_ref()
    }

    pub fn new_chat_mode(&self) -> bool {
        self.new_chat_mode
    }

    pub fn flow(&self) -> &FlowState<()> {
        &self.flow
    }

    /// Load all threads for a user, replacing the in-memory list wholesale.
    pub async fn fetch_history(&mut self, user_id: &str) -> &FlowState<()> {
        self.flow = FlowState::Pending;

        let result: Result<HistoryEnvelope, _> = self
            .api
            .get(&format!("/api/chat/history?user_id={user_id}"))
            .await;
        match result {
            Ok(envelope) => {
                self.threads = envelope.threads;
                self.flow = FlowState::Fulfilled(());
            }
            Err(e) => {
                self.flow = FlowState::Rejected(e.message());
            }
        }

        &self.flow
    }

    /// Persist a thread; on success upsert it into the list by id and
    /// refresh the active-thread reference when it matches.
    pub async fn save_thread(&mut self, thread: ChatThread) -> &FlowState<()> {
        self.flow = FlowState::Pending;

        let result: Result<serde_json::Value, _> =
            self.api.post("/api/chat/save", &thread).await;
        match result {
            Ok(_) => {
                match self.threads.iter_mut().find(|t| t.id == thread.id) {
                    Some(existing) => *existing = thread.clone(),
                    None => self.threads.push(thread.clone()),
                }
                if self.current.as_ref().is_some_and(|c| c.id == thread.id) {
                    self.current = Some(thread);
                }
                self.flow = FlowState::Fulfilled(());
            }
            Err(e) => {
                self.flow = FlowState::Rejected(e.message());
            }
        }

        &self.flow
    }

    /// Persist the active thread, if there is one.
    pub async fn save_current(&mut self) -> &FlowState<()> {
        match self.current.clone() {
            Some(thread) => self.save_thread(thread).await,
            None => {
                self.flow = FlowState::Rejected("No active thread".to_string());
                &self.flow
            }
        }
    }

    /// Delete a thread from the backend and the in-memory list; clears the
    /// active thread when it was the one deleted.
    pub async fn delete_thread(&mut self, thread_id: &str) -> &FlowState<()> {
        self.flow = FlowState::Pending;

        let result: Result<serde_json::Value, _> =
            self.api.delete(&format!("/api/chat/{thread_id}")).await;
        match result {
            Ok(_) => {
                self.threads.retain(|t| t.id != thread_id);
                if self.current.as_ref().is_some_and(|c| c.id == thread_id) {
                    self.current = None;
                }
                self.flow = FlowState::Fulfilled(());
            }
            Err(e) => {
                self.flow = FlowState::Rejected(e.message());
            }
        }

        &self.flow
    }

    /// Append a message to the active thread. Local-only: stamps
    /// `updated_at` and, for the first user message while the title is
    /// still the default, derives the title. No-op without an active
    /// thread.
    pub fn add_message(&mut self, sender: Sender, text: &str) -> Option<&ChatMessage> {
        let current = self.current.as_mut()?;
        Some(current.push_message(sender, text))
    }

    /// Start an empty thread at the front of the list as the active one.
    pub fn start_new_thread(&mut self, user_id: &str) -> &ChatThread {
        let thread = ChatThread::new(user_id);
        self.threads.insert(0, thread.clone());
        self.current = Some(thread);
        self.current.as_ref().expect("just set")
    }

    /// Start a thread pre-seeded with one AI-authored welcome message.
    pub fn create_thread_with_welcome(&mut self, user_id: &str, welcome: &str) -> &ChatThread {
        let mut thread = ChatThread::new(user_id);
        thread.push_message(Sender::Ai, welcome);
        self.threads.insert(0, thread.clone());
        self.current = Some(thread);
        self.current.as_ref().expect("just set")
    }

    pub fn set_current_thread(&mut self, thread: Option<ChatThread>) {
        self.current = thread;
    }

    /// Pure UI flag gating which screen renders.
    pub fn enter_new_chat_mode(&mut self) {
        self.new_chat_mode = true;
        self.current = None;
    }

    pub fn exit_new_chat_mode(&mut self) {
        self.new_chat_mode = false;
    }
}
