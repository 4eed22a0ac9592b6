//! Typed access to the persisted records.
//!
//! Every write is best-effort: failures are logged and swallowed so the
//! in-memory session stays usable when the store is not.

use crate::store::KeyValueStore;
use crate::theme::Theme;
use tracing::warn;

pub const THEME_KEY: &str = "theme";
pub const HISTORY_KEY: &str = "searchHistory";
pub const FAVORITES_KEY: &str = "favorites";
pub const WOTD_KEY: &str = "wotd";
pub const WOTD_DATE_KEY: &str = "wotdDate";

pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load_theme(&self) -> Theme {
        Theme::from_stored(self.read(THEME_KEY).as_deref())
    }

    pub fn save_theme(&self, theme: Theme) {
        self.write(THEME_KEY, theme.as_str());
    }

    pub fn load_history(&self) -> Vec<String> {
        self.read_list(HISTORY_KEY)
    }

    pub fn save_history(&self, entries: &[String]) {
        self.write_list(HISTORY_KEY, entries);
    }

    pub fn remove_history(&self) {
        self.delete(HISTORY_KEY);
    }

    pub fn load_favorites(&self) -> Vec<String> {
        self.read_list(FAVORITES_KEY)
    }

    pub fn save_favorites(&self, words: &[String]) {
        self.write_list(FAVORITES_KEY, words);
    }

    pub fn remove_favorites(&self) {
        self.delete(FAVORITES_KEY);
    }

    /// Stored word of the day together with the date string it was chosen on.
    pub fn load_word_of_the_day(&self) -> (Option<String>, Option<String>) {
        (self.read(WOTD_KEY), self.read(WOTD_DATE_KEY))
    }

    pub fn save_word_of_the_day(&self, word: &str, date: &str) {
        self.write(WOTD_KEY, word);
        self.write(WOTD_DATE_KEY, date);
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, key, "failed to read stored record");
                None
            }
        }
    }

    fn read_list(&self, key: &str) -> Vec<String> {
        let Some(raw) = self.read(key) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(err) => {
                warn!(error = %err, key, "ignoring malformed stored list");
                Vec::new()
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            warn!(error = %err, key, "failed to persist record");
        }
    }

    fn write_list(&self, key: &str, items: &[String]) {
        match serde_json::to_string(items) {
            Ok(raw) => self.write(key, &raw),
            Err(err) => warn!(error = %err, key, "failed to serialize stored list"),
        }
    }

    fn delete(&self, key: &str) {
        if let Err(err) = self.store.remove(key) {
            warn!(error = %err, key, "failed to remove stored record");
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::MemoryStore;
    use std::io;

    /// Store whose every operation fails, for exercising the best-effort paths.
    pub(crate) struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(io::Error::other("disk gone").into())
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(io::Error::other("quota exceeded").into())
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(io::Error::other("disk gone").into())
        }
    }

    #[test]
    fn lists_are_json_encoded_under_their_keys() {
        let store = MemoryStore::new();
        let persistence = Persistence::new(&store);
        persistence.save_history(&["dog".to_string(), "cat".to_string()]);
        assert_eq!(
            store.get(HISTORY_KEY).unwrap().as_deref(),
            Some(r#"["dog","cat"]"#)
        );
        assert_eq!(persistence.load_history(), vec!["dog", "cat"]);
    }

    #[test]
    fn absent_and_malformed_lists_load_empty() {
        let store = MemoryStore::new();
        store.set(FAVORITES_KEY, "{oops").unwrap();
        let persistence = Persistence::new(&store);
        assert!(persistence.load_history().is_empty());
        assert!(persistence.load_favorites().is_empty());
    }

    #[test]
    fn theme_round_trips() {
        let persistence = Persistence::new(MemoryStore::new());
        assert_eq!(persistence.load_theme(), Theme::Light);
        persistence.save_theme(Theme::Dark);
        assert_eq!(persistence.load_theme(), Theme::Dark);
    }

    #[test]
    fn broken_store_degrades_to_defaults() {
        let persistence = Persistence::new(BrokenStore);
        persistence.save_theme(Theme::Dark);
        persistence.save_history(&["dog".to_string()]);
        persistence.remove_favorites();
        assert_eq!(persistence.load_theme(), Theme::Light);
        assert!(persistence.load_history().is_empty());
        assert_eq!(persistence.load_word_of_the_day(), (None, None));
    }
}
