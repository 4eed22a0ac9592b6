use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One entry returned by the dictionary service.
///
/// Only the fields the client reads are modelled; anything else in the
/// payload is ignored. List fields default to empty so sparse entries still
/// decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordRecord {
    pub word: String,
    #[serde(default)]
    pub phonetic: Option<String>,
    #[serde(default)]
    pub phonetics: Vec<Phonetic>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
    #[serde(default)]
    pub license: Option<License>,
    #[serde(default)]
    pub source_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phonetic {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
}

impl Phonetic {
    /// The service sends `""` for transcriptions without a recording.
    pub fn audio_url(&self) -> Option<&str> {
        self.audio.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub definition: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Summary counts shown next to a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WordStats {
    pub meanings: usize,
    pub definitions: usize,
    pub parts_of_speech: usize,
    pub letters: usize,
}

impl WordRecord {
    pub fn stats(&self) -> WordStats {
        let parts: HashSet<&str> = self
            .meanings
            .iter()
            .map(|meaning| meaning.part_of_speech.as_str())
            .collect();
        WordStats {
            meanings: self.meanings.len(),
            definitions: self
                .meanings
                .iter()
                .map(|meaning| meaning.definitions.len())
                .sum(),
            parts_of_speech: parts.len(),
            letters: self.word.chars().count(),
        }
    }

    /// Phonetics that carry either a transcription or a recording.
    pub fn phonetics(&self) -> impl Iterator<Item = &Phonetic> + '_ {
        self.phonetics
            .iter()
            .filter(|phonetic| phonetic.text().is_some() || phonetic.audio_url().is_some())
    }

    /// Best single transcription: the top-level one, else the first non-empty.
    pub fn primary_phonetic(&self) -> Option<&str> {
        self.phonetic
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .or_else(|| self.phonetics.iter().find_map(Phonetic::text))
    }

    /// Synonyms across the group and its definitions, first occurrence kept.
    pub fn synonyms_of(meaning: &Meaning) -> Vec<&str> {
        collect_unique(
            meaning
                .synonyms
                .iter()
                .chain(meaning.definitions.iter().flat_map(|d| d.synonyms.iter())),
        )
    }

    pub fn antonyms_of(meaning: &Meaning) -> Vec<&str> {
        collect_unique(
            meaning
                .antonyms
                .iter()
                .chain(meaning.definitions.iter().flat_map(|d| d.antonyms.iter())),
        )
    }
}

fn collect_unique<'a>(items: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    items
        .map(String::as_str)
        .filter(|item| seen.insert(*item))
        .collect()
}
