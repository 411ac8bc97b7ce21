//! Session storage behind an injectable trait.
//!
//! The original design kept the token and cached user in global browser
//! storage; here the backend is explicit and swappable, so tests run
//! against an in-memory map and real deployments persist to a JSON file.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{ClientError, Result};

/// Storage key for the session token.
pub const TOKEN_KEY: &str = "fitness_ai_token";

/// Storage key for the cached user record.
pub const USER_KEY: &str = "fitness_ai_user";

/// Key-value session storage.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Remove both session keys. Best-effort: storage failures during a
/// clear are swallowed, matching the "always log out locally" policy.
pub fn clear_session(store: &dyn TokenStore) {
    let _ = store.remove(TOKEN_KEY);
    let _ = store.remove(USER_KEY);
}

/// Volatile store for tests and short-lived sessions.
#[derive(Default)]
pub struct MemoryTokenStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

/// JSON-file-backed store: one flat string map per file.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<HashMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(ClientError::Storage(e.to_string())),
        }
    }

    fn write_map(&self, map: &HashMap<String, String>) -> Result<()> {
        let contents = serde_json::to_string(map)?;
        std::fs::write(&self.path, contents).map_err(|e| ClientError::Storage(e.to_string()))
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);

        store.set(TOKEN_KEY, "tok").unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), Some("tok".to_string()));

        store.remove(TOKEN_KEY).unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn clear_session_removes_both_keys() {
        let store = MemoryTokenStore::new();
        store.set(TOKEN_KEY, "tok").unwrap();
        store.set(USER_KEY, "{}").unwrap();

        clear_session(&store);
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(store.get(USER_KEY).unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileTokenStore::new(&path);
        store.set(TOKEN_KEY, "tok").unwrap();
        store.set(USER_KEY, r#"{"id":"u1"}"#).unwrap();

        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.get(TOKEN_KEY).unwrap(), Some("tok".to_string()));

        reopened.remove(TOKEN_KEY).unwrap();
        assert_eq!(FileTokenStore::new(&path).get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let store = FileTokenStore::new("/nonexistent/dir/session.json");
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    }
}
