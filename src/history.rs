use serde::Serialize;

pub const HISTORY_CAPACITY: usize = 20;

/// Returns `entries` with `word` moved (or added) to the front, bounded to
/// [`HISTORY_CAPACITY`]. Matching is exact and case-sensitive.
pub fn with_search(entries: &[String], word: &str) -> Vec<String> {
    let mut next = Vec::with_capacity(HISTORY_CAPACITY);
    next.push(word.to_string());
    next.extend(
        entries
            .iter()
            .filter(|entry| entry.as_str() != word)
            .take(HISTORY_CAPACITY - 1)
            .cloned(),
    );
    next
}

/// Recent searches, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    /// Rebuilds from stored entries, restoring the invariants in case the
    /// stored list was edited by hand.
    pub fn from_stored(stored: Vec<String>) -> Self {
        let mut entries: Vec<String> = Vec::with_capacity(stored.len().min(HISTORY_CAPACITY));
        for word in stored {
            if entries.len() == HISTORY_CAPACITY {
                break;
            }
            if !entries.contains(&word) {
                entries.push(word);
            }
        }
        Self { entries }
    }

    pub fn record(&mut self, word: &str) {
        self.entries = with_search(&self.entries, word);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn words(history: &History) -> Vec<&str> {
        history.entries().iter().map(String::as_str).collect()
    }

    #[test]
    fn most_recent_first_without_duplicates() {
        let mut history = History::default();
        for word in ["dog", "cat", "dog", "bird", "cat", "cat"] {
            history.record(word);
            let unique: HashSet<_> = history.entries().iter().collect();
            assert_eq!(unique.len(), history.len());
        }
        assert_eq!(words(&history), vec!["cat", "bird", "dog"]);
    }

    #[test]
    fn keeps_only_the_twenty_most_recent() {
        let mut history = History::default();
        for index in 0..25 {
            history.record(&format!("word{index}"));
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.entries()[0], "word24");
        assert_eq!(history.entries()[19], "word5");
        assert!(!history.entries().iter().any(|w| w == "word4"));
    }

    #[test]
    fn repeat_search_moves_to_front_without_growing() {
        let mut history = History::default();
        for index in 0..HISTORY_CAPACITY {
            history.record(&format!("w{index}"));
        }
        history.record("w3");
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.entries()[0], "w3");
        assert_eq!(history.entries().iter().filter(|w| *w == "w3").count(), 1);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let mut history = History::default();
        history.record("Dog");
        history.record("dog");
        assert_eq!(words(&history), vec!["dog", "Dog"]);
    }

    #[test]
    fn with_search_leaves_input_untouched() {
        let before = vec!["a".to_string(), "b".to_string()];
        let after = with_search(&before, "b");
        assert_eq!(before, vec!["a", "b"]);
        assert_eq!(after, vec!["b", "a"]);
    }

    #[test]
    fn stored_lists_are_normalised() {
        let mut stored: Vec<String> = (0..30).map(|i| format!("s{i}")).collect();
        stored.insert(1, "s0".to_string());
        let history = History::from_stored(stored);
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.entries()[1], "s1");
    }
}
