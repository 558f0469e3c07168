// src/store/memory.rs
//
// In-memory store, the test double for SqliteStore.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::store::adapter::{prefixed, StoreAdapter, APP_PREFIX};

/// Volatile key-value store holding JSON values in a map.
///
/// Behaves exactly like the durable store at the adapter contract level,
/// including key prefixing, so repositories cannot tell them apart.
#[derive(Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoreAdapter for InMemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.lock().unwrap().get(&prefixed(key)).cloned()
    }

    fn set(&self, key: &str, value: &Value) {
        self.entries
            .lock()
            .unwrap()
            .insert(prefixed(key), value.clone());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(&prefixed(key));
    }

    fn clear_all(&self) {
        self.entries
            .lock()
            .unwrap()
            .retain(|key, _| !key.starts_with(APP_PREFIX));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip() {
        let store = InMemoryStore::new();
        store.set("movies", &json!([{"title": "Heat"}]));

        assert_eq!(store.get("movies"), Some(json!([{"title": "Heat"}])));
        assert_eq!(store.get("categories"), None);
    }

    #[test]
    fn test_clear_all_empties_namespace() {
        let store = InMemoryStore::new();
        store.set("movies", &json!([]));
        store.set("categories", &json!([]));

        store.clear_all();

        assert_eq!(store.get("movies"), None);
        assert_eq!(store.get("categories"), None);
    }
}
