use serde::Serialize;

/// Returns `words` with `word`'s membership flipped, and whether it is now a
/// member. Removal keeps the order of the remaining words.
pub fn toggled(words: &[String], word: &str) -> (Vec<String>, bool) {
    if words.iter().any(|existing| existing == word) {
        let next = words
            .iter()
            .filter(|existing| existing.as_str() != word)
            .cloned()
            .collect();
        (next, false)
    } else {
        let mut next = words.to_vec();
        next.push(word.to_string());
        (next, true)
    }
}

/// Starred words. Unbounded; each word appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Favorites {
    words: Vec<String>,
}

impl Favorites {
    pub fn from_stored(stored: Vec<String>) -> Self {
        let mut words: Vec<String> = Vec::with_capacity(stored.len());
        for word in stored {
            if !words.contains(&word) {
                words.push(word);
            }
        }
        Self { words }
    }

    pub fn toggle(&mut self, word: &str) -> bool {
        let (next, is_member) = toggled(&self.words, word);
        self.words = next;
        is_member
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|existing| existing == word)
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
