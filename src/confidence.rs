//! Per-word confidence ratings, persisted as a single JSON value that is
//! read at session start and overwritten on every change.

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

/// Storage key used by the browser build.
pub const STORAGE_KEY: &str = "vocab-confidence";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Confidence {
    Know,
    Learning,
    NeedHelp,
}

/// Key-value persistence, implemented by `localStorage` in the browser.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str);
}

impl KeyValueStore for BTreeMap<String, String> {
    fn read(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }
}

/// Ratings keyed by the literal word string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfidenceStore {
    ratings: BTreeMap<String, Confidence>,
}

impl ConfidenceStore {
    /// Load ratings; a missing or unreadable value starts empty.
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        let Some(json) = store.read(STORAGE_KEY) else {
            return Self::default();
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!("confidence: discarding unreadable ratings: {}", e);
            Self::default()
        })
    }

    pub fn save<S: KeyValueStore>(&self, store: &mut S) {
        match serde_json::to_string(self) {
            Ok(json) => store.write(STORAGE_KEY, &json),
            Err(e) => warn!("confidence: could not serialize ratings: {}", e),
        }
    }

    pub fn get(&self, word: &str) -> Option<Confidence> {
        self.ratings.get(word).copied()
    }

    /// Set or clear a rating.
    pub fn set(&mut self, word: &str, rating: Option<Confidence>) {
        match rating {
            Some(r) => {
                self.ratings.insert(word.to_string(), r);
            }
            None => {
                self.ratings.remove(word);
            }
        }
    }

    pub fn count(&self, rating: Confidence) -> usize {
        self.ratings.values().filter(|&&r| r == rating).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_store() {
        let mut kv: BTreeMap<String, String> = BTreeMap::new();
        let mut ratings = ConfidenceStore::load(&kv);
        assert_eq!(ratings.get("lucid"), None);

        ratings.set("lucid", Some(Confidence::Know));
        ratings.set("aloof", Some(Confidence::NeedHelp));
        ratings.save(&mut kv);
        assert_eq!(
            kv.get(STORAGE_KEY).map(String::as_str),
            Some(r#"{"aloof":"need-help","lucid":"know"}"#)
        );

        let mut loaded = ConfidenceStore::load(&kv);
        assert_eq!(loaded, ratings);
        loaded.set("lucid", None);
        assert_eq!(loaded.get("lucid"), None);
        assert_eq!(loaded.count(Confidence::NeedHelp), 1);
    }

    #[test]
    fn test_garbage_starts_empty() {
        let mut kv: BTreeMap<String, String> = BTreeMap::new();
        kv.insert(STORAGE_KEY.to_string(), "{oops".to_string());
        assert_eq!(ConfidenceStore::load(&kv), ConfidenceStore::default());
    }
}
