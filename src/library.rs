//! The user's persisted word lists and preferences.
//!
//! Each mutation updates memory first and then writes the affected record;
//! a failed write is logged by [`Persistence`] and otherwise ignored.

use crate::daily::{self, WordOfTheDay};
use crate::favorites::Favorites;
use crate::history::History;
use crate::persist::Persistence;
use crate::store::KeyValueStore;
use crate::theme::Theme;
use chrono::NaiveDate;
use rand::Rng;
use tracing::debug;

pub struct Library<S> {
    persistence: Persistence<S>,
    history: History,
    favorites: Favorites,
    theme: Theme,
}

impl<S: KeyValueStore> Library<S> {
    pub fn load(persistence: Persistence<S>) -> Self {
        let history = History::from_stored(persistence.load_history());
        let favorites = Favorites::from_stored(persistence.load_favorites());
        let theme = persistence.load_theme();
        debug!(
            history = history.len(),
            favorites = favorites.len(),
            %theme,
            "loaded library"
        );
        Self {
            persistence,
            history,
            favorites,
            theme,
        }
    }

    pub fn record_search(&mut self, word: &str) {
        self.history.record(word);
        self.persistence.save_history(self.history.entries());
    }

    /// Returns whether `word` is a favorite afterwards.
    pub fn toggle_favorite(&mut self, word: &str) -> bool {
        let is_favorite = self.favorites.toggle(word);
        self.persistence.save_favorites(self.favorites.words());
        is_favorite
    }

    /// Empties the history and drops its stored record entirely.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.persistence.remove_history();
    }

    pub fn clear_favorites(&mut self) {
        self.favorites.clear();
        self.persistence.remove_favorites();
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.persistence.save_theme(self.theme);
        self.theme
    }

    pub fn word_of_the_day<R: Rng + ?Sized>(&self, today: NaiveDate, rng: &mut R) -> WordOfTheDay {
        daily::load_word_of_the_day(&self.persistence, today, rng)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::tests::BrokenStore;
    use crate::persist::{FAVORITES_KEY, HISTORY_KEY, THEME_KEY};
    use crate::store::{FileStore, MemoryStore};

    #[test]
    fn every_search_is_persisted() {
        let store = MemoryStore::new();
        let mut library = Library::load(Persistence::new(&store));
        library.record_search("dog");
        library.record_search("cat");
        library.record_search("dog");
        assert_eq!(
            store.get(HISTORY_KEY).unwrap().as_deref(),
            Some(r#"["dog","cat"]"#)
        );
    }

    #[test]
    fn clearing_removes_records_instead_of_storing_empty_lists() {
        let store = MemoryStore::new();
        let mut library = Library::load(Persistence::new(&store));
        library.record_search("dog");
        library.toggle_favorite("dog");
        library.clear_history();
        library.clear_favorites();
        assert!(!store.contains(HISTORY_KEY));
        assert!(!store.contains(FAVORITES_KEY));
        assert!(library.history().is_empty());
        assert!(library.favorites().is_empty());
    }

    #[test]
    fn favorites_toggle_reports_membership_and_persists() {
        let store = MemoryStore::new();
        let mut library = Library::load(Persistence::new(&store));
        assert!(library.toggle_favorite("ephemeral"));
        assert_eq!(
            store.get(FAVORITES_KEY).unwrap().as_deref(),
            Some(r#"["ephemeral"]"#)
        );
        assert!(!library.toggle_favorite("ephemeral"));
        assert_eq!(store.get(FAVORITES_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn state_is_restored_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        {
            let mut library = Library::load(Persistence::new(FileStore::open(&path).unwrap()));
            library.record_search("serendipity");
            library.toggle_favorite("serendipity");
            assert_eq!(library.toggle_theme(), Theme::Dark);
        }
        let library = Library::load(Persistence::new(FileStore::open(&path).unwrap()));
        assert_eq!(library.history().entries(), ["serendipity"]);
        assert!(library.favorites().contains("serendipity"));
        assert_eq!(library.theme(), Theme::Dark);
        assert_eq!(
            library.persistence().store().get(THEME_KEY).unwrap().as_deref(),
            Some("dark")
        );
    }

    #[test]
    fn broken_store_keeps_memory_authoritative() {
        let mut library = Library::load(Persistence::new(BrokenStore));
        library.record_search("dog");
        assert!(library.toggle_favorite("dog"));
        assert_eq!(library.toggle_theme(), Theme::Dark);
        assert_eq!(library.history().entries(), ["dog"]);
        assert!(library.favorites().contains("dog"));
    }
}
