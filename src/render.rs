use crate::favorites::Favorites;
use crate::history::History;
use crate::record::{Meaning, WordRecord};
use crate::session::{Phase, SessionState};
use crate::theme::Theme;
use crate::wordplay::TRENDING_WORDS;
use serde_json::{Value, json};

/// Everything a presenter may show, borrowed from the controller.
pub struct View<'a> {
    pub session: &'a SessionState,
    pub history: &'a History,
    pub favorites: &'a Favorites,
    pub theme: Theme,
}

impl<'a> View<'a> {
    /// Whether the displayed word is starred.
    pub fn is_current_favorite(&self) -> bool {
        self.session
            .displayed_word()
            .is_some_and(|word| self.favorites.contains(word))
    }

    pub fn trending(&self) -> &'static [&'static str] {
        &TRENDING_WORDS
    }

    /// Result shown for the current phase; `None` unless results are up.
    pub fn displayed_record(&self) -> Option<&'a WordRecord> {
        match self.session.phase() {
            Phase::Results => self.session.current(),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        let session = self.session;
        let error = match session.phase() {
            Phase::Error(err) => json!({
                "kind": err.kind(),
                "title": err.title(),
                "message": session.error_message(),
            }),
            _ => Value::Null,
        };
        let result = self.displayed_record().map(|record| {
            json!({
                "word": record.word,
                "phonetic": record.primary_phonetic(),
                "phonetics": record.phonetics().map(|p| json!({
                    "text": p.text(),
                    "audio": p.audio_url(),
                })).collect::<Vec<_>>(),
                "meanings": record.meanings.iter().map(meaning_to_json).collect::<Vec<_>>(),
                "stats": record.stats(),
                "source_urls": record.source_urls,
                "license": record.license.as_ref().map(|license| &license.name),
                "is_favorite": self.is_current_favorite(),
                "scramble": session.scramble().map(|game| game.display()),
                "rhymes": session.rhymes(),
            })
        });
        json!({
            "phase": session.phase().name(),
            "query": session.input(),
            "theme": self.theme,
            "error": error,
            "result": result,
            "panel": session.open_panel().map(|panel| panel.name()),
            "history": self.history,
            "favorites": self.favorites,
            "word_of_the_day": session.word_of_the_day(),
            "trending": self.trending(),
            "counts": {
                "searched": self.history.len(),
                "favorites": self.favorites.len(),
            },
        })
    }
}

fn meaning_to_json(meaning: &Meaning) -> Value {
    json!({
        "part_of_speech": meaning.part_of_speech,
        "definitions": meaning.definitions.iter().map(|definition| json!({
            "definition": definition.definition,
            "example": definition.example,
        })).collect::<Vec<_>>(),
        "synonyms": WordRecord::synonyms_of(meaning),
        "antonyms": WordRecord::antonyms_of(meaning),
    })
}

/// Presentation seam: called once after every dispatched action.
pub trait Render {
    fn render(&mut self, view: &View<'_>);
}
