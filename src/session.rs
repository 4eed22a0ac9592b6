//! Transient per-run state: what is on screen and which search owns it.
//!
//! Every search takes a [`RequestToken`]. Only the most recently issued
//! token may commit, so a slow response can never replace a newer one.

use crate::daily::WordOfTheDay;
use crate::error::LookupError;
use crate::record::WordRecord;
use crate::wordplay::{ScrambleGame, rhymes_for};
use rand::Rng;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Results,
    Error(LookupError),
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::Results => "results",
            Phase::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    History,
    Favorites,
}

impl Panel {
    pub fn name(&self) -> &'static str {
        match self {
            Panel::History => "history",
            Panel::Favorites => "favorites",
        }
    }
}

#[derive(Debug, Default)]
pub struct SessionState {
    phase: Phase,
    input: String,
    failed_term: String,
    current: Option<WordRecord>,
    rhymes: Vec<String>,
    scramble: Option<ScrambleGame>,
    word_of_the_day: Option<WordOfTheDay>,
    open_panel: Option<Panel>,
    last_token: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters `Loading` for `input` and hands out the token that may commit.
    pub fn begin_search(&mut self, input: &str) -> RequestToken {
        self.last_token += 1;
        self.input = input.to_string();
        self.phase = Phase::Loading;
        RequestToken(self.last_token)
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        token.0 == self.last_token
    }

    /// Shows `record` unless a newer search was started meanwhile.
    /// Returns whether the record was committed.
    pub fn commit_result<R: Rng + ?Sized>(
        &mut self,
        token: RequestToken,
        record: WordRecord,
        rng: &mut R,
    ) -> bool {
        if !self.is_latest(token) {
            debug!(token = token.0, latest = self.last_token, word = %record.word, "dropping stale result");
            return false;
        }
        self.rhymes = rhymes_for(&record.word);
        self.scramble = Some(ScrambleGame::new(&record.word, rng));
        self.current = Some(record);
        self.phase = Phase::Results;
        true
    }

    /// The previous record is kept but no longer displayed. The term that
    /// failed is captured here so later input edits leave the message alone.
    pub fn commit_error(&mut self, token: RequestToken, error: LookupError) -> bool {
        if !self.is_latest(token) {
            debug!(token = token.0, latest = self.last_token, %error, "dropping stale failure");
            return false;
        }
        self.failed_term.clone_from(&self.input);
        self.phase = Phase::Error(error);
        true
    }

    /// Message for the error on screen, if any.
    pub fn error_message(&self) -> Option<String> {
        match &self.phase {
            Phase::Error(error) => Some(error.message(&self.failed_term)),
            _ => None,
        }
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Opening one panel closes the other; toggling the open one closes it.
    pub fn toggle_panel(&mut self, panel: Panel) {
        self.open_panel = if self.open_panel == Some(panel) {
            None
        } else {
            Some(panel)
        };
    }

    pub fn close_panels(&mut self) {
        self.open_panel = None;
    }

    /// Returns false when no game is on screen.
    pub fn reveal_scramble(&mut self) -> bool {
        if !matches!(self.phase, Phase::Results) {
            return false;
        }
        match self.scramble.as_mut() {
            Some(game) => {
                game.reveal();
                true
            }
            None => false,
        }
    }

    pub fn set_word_of_the_day(&mut self, word_of_the_day: WordOfTheDay) {
        self.word_of_the_day = Some(word_of_the_day);
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn current(&self) -> Option<&WordRecord> {
        self.current.as_ref()
    }

    pub fn current_word(&self) -> Option<&str> {
        self.current.as_ref().map(|record| record.word.as_str())
    }

    /// The word on screen; `None` outside `Results` even if a record is kept.
    pub fn displayed_word(&self) -> Option<&str> {
        match self.phase {
            Phase::Results => self.current_word(),
            _ => None,
        }
    }

    pub fn rhymes(&self) -> &[String] {
        &self.rhymes
    }

    pub fn scramble(&self) -> Option<&ScrambleGame> {
        self.scramble.as_ref()
    }

    pub fn word_of_the_day(&self) -> Option<&WordOfTheDay> {
        self.word_of_the_day.as_ref()
    }

    pub fn open_panel(&self) -> Option<Panel> {
        self.open_panel
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn record(word: &str) -> WordRecord {
        serde_json::from_value(serde_json::json!({ "word": word, "meanings": [] })).unwrap()
    }

    #[test]
    fn search_moves_through_phases() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut session = SessionState::new();
        assert_eq!(session.phase(), &Phase::Idle);

        let token = session.begin_search("motion");
        assert!(session.is_loading());
        assert!(session.commit_result(token, record("motion"), &mut rng));
        assert_eq!(session.phase(), &Phase::Results);
        assert_eq!(session.current_word(), Some("motion"));
        assert_eq!(session.rhymes(), ["action", "potion", "notion"]);
        assert!(session.scramble().is_some_and(|game| !game.revealed));

        let token = session.begin_search("zzzz");
        assert!(session.commit_error(token, LookupError::NotFound));
        assert_eq!(session.phase(), &Phase::Error(LookupError::NotFound));
        assert_eq!(session.current_word(), Some("motion"));
        assert_eq!(session.displayed_word(), None);
    }

    #[test]
    fn error_message_keeps_failed_term_after_input_changes() {
        let mut session = SessionState::new();
        assert_eq!(session.error_message(), None);
        let token = session.begin_search("qwzx");
        session.commit_error(token, LookupError::NotFound);
        let before = session.error_message();
        assert!(before.as_deref().is_some_and(|message| message.contains("\"qwzx\"")));

        session.clear_input();
        assert_eq!(session.error_message(), before);
    }

    #[test]
    fn stale_result_never_overwrites_newer_one() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut session = SessionState::new();
        let first = session.begin_search("light");
        let second = session.begin_search("sound");

        assert!(session.commit_result(second, record("sound"), &mut rng));
        assert!(!session.commit_result(first, record("light"), &mut rng));
        assert!(!session.commit_error(first, LookupError::Offline));
        assert_eq!(session.current_word(), Some("sound"));
        assert_eq!(session.phase(), &Phase::Results);
    }

    #[test]
    fn stale_result_while_newer_is_pending_keeps_loading() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut session = SessionState::new();
        let first = session.begin_search("light");
        let _second = session.begin_search("sound");
        assert!(!session.commit_result(first, record("light"), &mut rng));
        assert!(session.is_loading());
        assert_eq!(session.current(), None);
    }

    #[test]
    fn panels_are_mutually_exclusive() {
        let mut session = SessionState::new();
        session.toggle_panel(Panel::History);
        assert_eq!(session.open_panel(), Some(Panel::History));
        session.toggle_panel(Panel::Favorites);
        assert_eq!(session.open_panel(), Some(Panel::Favorites));
        session.toggle_panel(Panel::Favorites);
        assert_eq!(session.open_panel(), None);
    }

    #[test]
    fn reveal_needs_a_game() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut session = SessionState::new();
        assert!(!session.reveal_scramble());
        let token = session.begin_search("ephemeral");
        session.commit_result(token, record("ephemeral"), &mut rng);
        assert!(session.reveal_scramble());
        assert_eq!(session.scramble().map(ScrambleGame::display), Some("ephemeral"));

        let token = session.begin_search("qwzx");
        session.commit_error(token, LookupError::NotFound);
        assert!(!session.reveal_scramble());
    }
}
