// src/store/adapter.rs
//
// Key-value store contract
//
// CRITICAL RULES:
// - Every key is namespaced with the application prefix
// - Readers see absence, never storage errors
// - Writers tolerate dropped writes (quota, IO); failures are logged
// - Values are JSON documents; typed mapping belongs to repositories

use serde_json::Value;

/// Namespace prefix applied to every stored key, to avoid collisions with
/// unrelated data sharing the same storage file.
pub const APP_PREFIX: &str = "CINETECH_";

/// Top-level key holding the movie collection.
pub const MOVIES_KEY: &str = "movies";

/// Top-level key holding the category collection.
pub const CATEGORIES_KEY: &str = "categories";

pub(crate) fn prefixed(key: &str) -> String {
    format!("{}{}", APP_PREFIX, key)
}

pub trait StoreAdapter: Send + Sync {
    /// Read a value. Absence and deserialization failures both yield `None`;
    /// failures are logged, never propagated.
    fn get(&self, key: &str) -> Option<Value>;

    /// Write a value, fully replacing any previous one. On failure the write
    /// is logged and dropped; callers must tolerate writes not persisting.
    fn set(&self, key: &str, value: &Value);

    /// Remove a key if present.
    fn remove(&self, key: &str);

    /// Remove every key under the application prefix, leaving unrelated data
    /// in the same storage untouched.
    fn clear_all(&self);
}
