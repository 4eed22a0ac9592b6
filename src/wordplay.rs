//! Small word games derived from the current result.
//!
//! Rhymes come from a fixed suffix table, not from pronunciation, so they
//! are only loosely related to the query.

use rand::Rng;

pub const MAX_RHYMES: usize = 6;

/// Checked in order; the first suffix the word ends with wins.
pub const RHYME_TABLE: &[(&str, &[&str])] = &[
    ("tion", &["action", "motion", "potion", "notion"]),
    ("ing", &["ring", "sing", "bring", "thing"]),
    ("ight", &["light", "bright", "sight", "fight"]),
    ("ound", &["sound", "ground", "found", "round"]),
    ("ess", &["dress", "press", "bless", "stress"]),
    ("ay", &["day", "way", "say", "play"]),
    ("ow", &["grow", "show", "know", "flow"]),
];

pub const FALLBACK_RHYMES: [&str; 4] = ["blue", "true", "new", "through"];

pub const TRENDING_WORDS: [&str; 6] = [
    "serendipity",
    "ephemeral",
    "melancholy",
    "eloquent",
    "luminous",
    "resilience",
];

/// Uniform random permutation of `word`'s characters (Fisher–Yates).
/// The result may equal the input.
pub fn scramble<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let mut chars: Vec<char> = word.chars().collect();
    for i in (1..chars.len()).rev() {
        let j = rng.gen_range(0..=i);
        chars.swap(i, j);
    }
    chars.into_iter().collect()
}

pub fn rhymes_for(word: &str) -> Vec<String> {
    let lowered = word.to_lowercase();
    for (suffix, candidates) in RHYME_TABLE {
        if lowered.ends_with(suffix) {
            return candidates
                .iter()
                .filter(|candidate| **candidate != lowered)
                .take(MAX_RHYMES)
                .map(|candidate| candidate.to_string())
                .collect();
        }
    }
    FALLBACK_RHYMES.iter().map(|word| word.to_string()).collect()
}

/// State of the unscramble mini-game for the displayed word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrambleGame {
    pub answer: String,
    pub scrambled: String,
    pub revealed: bool,
}

impl ScrambleGame {
    pub fn new<R: Rng + ?Sized>(answer: &str, rng: &mut R) -> Self {
        Self {
            answer: answer.to_string(),
            scrambled: scramble(answer, rng),
            revealed: false,
        }
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    /// What the player should currently see.
    pub fn display(&self) -> &str {
        if self.revealed {
            &self.answer
        } else {
            &self.scrambled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn sorted_chars(word: &str) -> Vec<char> {
        let mut chars: Vec<char> = word.chars().collect();
        chars.sort_unstable();
        chars
    }

    #[test]
    fn scramble_is_a_permutation() {
        let mut rng = SmallRng::seed_from_u64(7);
        for word in ["a", "ab", "serendipity", "naïve", "mississippi", "über-cool"] {
            for _ in 0..20 {
                let scrambled = scramble(word, &mut rng);
                assert_eq!(sorted_chars(&scrambled), sorted_chars(word), "{word} -> {scrambled}");
            }
        }
    }

    #[test]
    fn scramble_reaches_every_ordering_of_three_letters() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..600 {
            seen.insert(scramble("abc", &mut rng));
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn scramble_of_empty_and_single_is_identity() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(scramble("", &mut rng), "");
        assert_eq!(scramble("x", &mut rng), "x");
    }

    #[test]
    fn rhymes_exclude_the_query() {
        assert_eq!(rhymes_for("action"), vec!["motion", "potion", "notion"]);
        assert_eq!(rhymes_for("Light"), vec!["bright", "sight", "fight"]);
    }

    #[test]
    fn longer_words_match_on_suffix_only() {
        assert_eq!(rhymes_for("playing"), vec!["ring", "sing", "bring", "thing"]);
        assert_eq!(rhymes_for("station"), vec!["action", "motion", "potion", "notion"]);
    }

    #[test]
    fn unmatched_words_get_the_fallback() {
        assert_eq!(rhymes_for("xyz"), vec!["blue", "true", "new", "through"]);
        assert_eq!(rhymes_for(""), vec!["blue", "true", "new", "through"]);
    }

    #[test]
    fn game_reveals_answer() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut game = ScrambleGame::new("luminous", &mut rng);
        assert_eq!(sorted_chars(game.display()), sorted_chars("luminous"));
        game.reveal();
        assert_eq!(game.display(), "luminous");
    }
}
