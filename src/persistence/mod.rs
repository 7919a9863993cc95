//! Key/value persistence for the high score and settings
//!
//! Features:
//! - One small `KeyValueStore` trait with in-memory, file and (on wasm32)
//!   LocalStorage backends
//! - High score helpers that never fail the caller: storage errors are
//!   logged and the score stays session-only

pub mod store;

use std::fmt;

use log::{info, warn};

pub use store::MemoryStore;
#[cfg(not(target_arch = "wasm32"))]
pub use store::FileStore;

/// Storage key for the best score
pub const HIGH_SCORE_KEY: &str = "geoshooter-highscore";

#[derive(Debug)]
pub enum StorageError {
    /// No backing store in this environment (private browsing, no window)
    Unavailable,
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Backend-specific failure reported as text (e.g. a JS exception)
    Backend(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "storage unavailable"),
            StorageError::Io(e) => write!(f, "storage I/O error: {e}"),
            StorageError::Json(e) => write!(f, "storage JSON error: {e}"),
            StorageError::Backend(msg) => write!(f, "storage backend error: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Json(e)
    }
}

/// String key/value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Leading decimal digits of `raw`, or 0 when there are none
fn parse_score(raw: &str) -> u64 {
    let digits: String = raw.trim_start().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Stored high score, 0 when missing, garbled or unreadable
pub fn load_high_score(store: &dyn KeyValueStore) -> u64 {
    match store.get(HIGH_SCORE_KEY) {
        Ok(Some(raw)) => {
            let score = parse_score(&raw);
            info!("Loaded high score {score}");
            score
        }
        Ok(None) => 0,
        Err(e) => {
            warn!("Could not load high score: {e}");
            0
        }
    }
}

/// Persist `score`. Failures are logged and otherwise ignored.
pub fn save_high_score(store: &mut dyn KeyValueStore, score: u64) {
    match store.set(HIGH_SCORE_KEY, &score.to_string()) {
        Ok(()) => info!("High score {score} saved"),
        Err(e) => warn!("Could not save high score: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Store that fails every call
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("quota exceeded".into()))
        }
    }

    #[test]
    fn test_high_score_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(load_high_score(&store), 0);
        save_high_score(&mut store, 1234);
        assert_eq!(store.get(HIGH_SCORE_KEY).unwrap().as_deref(), Some("1234"));
        assert_eq!(load_high_score(&store), 1234);
    }

    #[test]
    fn test_garbled_score_reads_as_leading_digits() {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, "  987xyz").unwrap();
        assert_eq!(load_high_score(&store), 987);
        store.set(HIGH_SCORE_KEY, "not a number").unwrap();
        assert_eq!(load_high_score(&store), 0);
    }

    #[test]
    fn test_broken_store_is_swallowed() {
        let mut store = BrokenStore;
        assert_eq!(load_high_score(&store), 0);
        save_high_score(&mut store, 50);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(StorageError::Unavailable.to_string(), "storage unavailable");
        let e = StorageError::Backend("boom".into());
        assert!(e.to_string().contains("boom"));
    }
}
