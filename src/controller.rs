//! Maps user intents onto the core operations.
//!
//! Front ends translate their own events into [`Action`]s and call
//! [`Controller::dispatch`]; the controller mutates state and asks the
//! renderer to redraw once per action.

use crate::daily;
use crate::lookup::Dictionary;
use crate::library::Library;
use crate::render::{Render, View};
use crate::session::{Panel, SessionState};
use crate::store::KeyValueStore;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Search(String),
    ClearInput,
    ToggleTheme,
    ToggleHistoryPanel,
    ToggleFavoritesPanel,
    ClearHistory,
    ClearFavorites,
    /// Stars or unstars the displayed word.
    ToggleFavorite,
    RevealScramble,
    /// A trending, rhyme, history or favorite tag was picked.
    SearchTag(String),
    /// Text produced by an external speech recogniser.
    VoiceTranscript(String),
    ExploreWordOfTheDay,
}

pub struct Controller<S, D, R> {
    session: SessionState,
    library: Library<S>,
    dictionary: D,
    renderer: R,
    rng: SmallRng,
}

impl<S, D, R> Controller<S, D, R>
where
    S: KeyValueStore,
    D: Dictionary,
    R: Render,
{
    pub fn new(library: Library<S>, dictionary: D, renderer: R) -> Self {
        Self::with_rng(library, dictionary, renderer, SmallRng::from_entropy())
    }

    /// Loads today's word up front so every view can show it.
    pub fn with_rng(library: Library<S>, dictionary: D, renderer: R, mut rng: SmallRng) -> Self {
        let mut session = SessionState::new();
        session.set_word_of_the_day(library.word_of_the_day(daily::today(), &mut rng));
        Self {
            session,
            library,
            dictionary,
            renderer,
            rng,
        }
    }

    pub async fn dispatch(&mut self, action: Action) {
        self.apply(action).await;
        self.render();
    }

    /// Runs `action` without redrawing.
    pub async fn apply(&mut self, action: Action) {
        debug!(?action, "dispatching");
        match action {
            Action::Search(term) | Action::SearchTag(term) | Action::VoiceTranscript(term) => {
                self.session.close_panels();
                self.search(term).await;
            }
            Action::ExploreWordOfTheDay => {
                self.session.close_panels();
                if let Some(word) = self.session.word_of_the_day().map(|wotd| wotd.word.clone()) {
                    self.search(word).await;
                }
            }
            Action::ClearInput => self.session.clear_input(),
            Action::ToggleTheme => {
                let theme = self.library.toggle_theme();
                info!(%theme, "theme changed");
            }
            Action::ToggleHistoryPanel => self.session.toggle_panel(Panel::History),
            Action::ToggleFavoritesPanel => self.session.toggle_panel(Panel::Favorites),
            Action::ClearHistory => self.library.clear_history(),
            Action::ClearFavorites => self.library.clear_favorites(),
            Action::ToggleFavorite => {
                if let Some(word) = self.session.displayed_word().map(str::to_string) {
                    let starred = self.library.toggle_favorite(&word);
                    info!(word = %word, starred, "favorite toggled");
                }
            }
            Action::RevealScramble => {
                self.session.reveal_scramble();
            }
        }
    }

    async fn search(&mut self, input: String) {
        let token = self.session.begin_search(&input);
        match self.dictionary.lookup(&input).await {
            Ok(record) => {
                if self.session.commit_result(token, record, &mut self.rng) {
                    self.library.record_search(input.trim());
                }
            }
            Err(err) => {
                debug!(error = %err, input = %input, "lookup failed");
                self.session.commit_error(token, err);
            }
        }
    }

    pub fn render(&mut self) {
        let view = View {
            session: &self.session,
            history: self.library.history(),
            favorites: self.library.favorites(),
            theme: self.library.theme(),
        };
        self.renderer.render(&view);
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn library(&self) -> &Library<S> {
        &self.library
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
