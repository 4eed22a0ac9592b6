use crate::persist::Persistence;
use crate::store::KeyValueStore;
use chrono::{Local, NaiveDate};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

pub const WORD_OF_THE_DAY_CANDIDATES: [&str; 10] = [
    "serendipity",
    "ephemeral",
    "luminous",
    "eloquent",
    "melancholy",
    "resilience",
    "pristine",
    "ethereal",
    "sonorous",
    "ebullient",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordOfTheDay {
    pub word: String,
    pub date: String,
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Stored dates are compared as strings, so the format must stay fixed.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Reuses the stored word while its date matches `today`; otherwise picks a
/// new candidate and stores it with today's date.
pub fn load_word_of_the_day<S, R>(
    persistence: &Persistence<S>,
    today: NaiveDate,
    rng: &mut R,
) -> WordOfTheDay
where
    S: KeyValueStore,
    R: Rng + ?Sized,
{
    let today = date_key(today);
    if let (Some(word), Some(date)) = persistence.load_word_of_the_day() {
        if !word.is_empty() && date == today {
            return WordOfTheDay { word, date };
        }
    }
    let word = WORD_OF_THE_DAY_CANDIDATES[rng.gen_range(0..WORD_OF_THE_DAY_CANDIDATES.len())];
    debug!(word, date = %today, "picked new word of the day");
    persistence.save_word_of_the_day(word, &today);
    WordOfTheDay {
        word: word.to_string(),
        date: today,
    }
}
