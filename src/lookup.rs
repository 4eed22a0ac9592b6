//! Client for the public word-definition service.
//!
//! One GET per lookup, no retries. The outcome is folded into
//! [`LookupError`] so callers only ever match on a closed set of kinds.

use crate::config::ClientConfig;
use crate::error::LookupError;
use crate::record::WordRecord;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::StatusCode;
use std::future::Future;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'~');
const USER_AGENT: &str = concat!("wordscope/", env!("CARGO_PKG_VERSION"));

/// Anything that can resolve a search term to a record.
pub trait Dictionary {
    fn lookup(
        &self,
        term: &str,
    ) -> impl Future<Output = Result<WordRecord, LookupError>> + Send;
}

#[derive(Debug, Error)]
pub enum ClientSetupError {
    #[error("invalid dictionary service url {url:?}: {source}")]
    InvalidBase {
        url: String,
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct LookupClient {
    http: reqwest::Client,
    entries_url: Url,
}

impl LookupClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientSetupError> {
        let raw = config.entries_url();
        let entries_url = Url::parse(&raw).map_err(|source| ClientSetupError::InvalidBase {
            url: raw.clone(),
            source,
        })?;
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            entries_url,
        })
    }

    /// URL for an already-normalised term.
    pub fn request_url(&self, term: &str) -> Result<Url, url::ParseError> {
        let segment = utf8_percent_encode(term, PATH_SEGMENT).to_string();
        self.entries_url.join(&segment)
    }

    async fn fetch(&self, term: &str) -> Result<WordRecord, LookupError> {
        let Some(term) = normalize_term(term) else {
            return Err(LookupError::EmptyInput);
        };
        let url = self
            .request_url(&term)
            .map_err(|err| LookupError::MalformedResponse(err.to_string()))?;

        let started = Instant::now();
        let response = self.http.get(url).send().await.map_err(|err| {
            warn!(error = %err, term = %term, "dictionary request failed");
            LookupError::Offline
        })?;
        let status = response.status();
        info!(
            term = %term,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "dictionary lookup finished"
        );
        if let Some(err) = classify_status(status) {
            return Err(err);
        }

        let body = response.bytes().await.map_err(|err| {
            warn!(error = %err, term = %term, "dictionary response body interrupted");
            LookupError::Offline
        })?;
        first_entry(&body)
    }
}

impl Dictionary for LookupClient {
    async fn lookup(&self, term: &str) -> Result<WordRecord, LookupError> {
        self.fetch(term).await
    }
}

/// Trimmed, lowercased term, or `None` when nothing is left to search for.
pub fn normalize_term(term: &str) -> Option<String> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// `None` for success statuses.
pub fn classify_status(status: StatusCode) -> Option<LookupError> {
    if status.is_success() {
        None
    } else if status == StatusCode::NOT_FOUND {
        Some(LookupError::NotFound)
    } else {
        Some(LookupError::ServiceError {
            status: status.as_u16(),
        })
    }
}

/// Decodes the service's array payload and keeps only its first element.
pub fn first_entry(body: &[u8]) -> Result<WordRecord, LookupError> {
    let entries: Vec<serde_json::Value> = serde_json::from_slice(body)
        .map_err(|err| LookupError::MalformedResponse(err.to_string()))?;
    let first = entries
        .into_iter()
        .next()
        .ok_or_else(|| LookupError::MalformedResponse("empty entry list".to_string()))?;
    let record: WordRecord = serde_json::from_value(first)
        .map_err(|err| LookupError::MalformedResponse(err.to_string()))?;
    debug!(word = %record.word, meanings = record.meanings.len(), "decoded entry");
    Ok(record)
}
