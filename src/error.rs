use thiserror::Error;

/// Why a single lookup produced no record. None of these are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("search term is empty")]
    EmptyInput,
    #[error("no dictionary entry for the requested word")]
    NotFound,
    #[error("dictionary service answered with status {status}")]
    ServiceError { status: u16 },
    #[error("dictionary service is unreachable")]
    Offline,
    #[error("dictionary service returned an unexpected payload: {0}")]
    MalformedResponse(String),
}

impl LookupError {
    pub fn title(&self) -> &'static str {
        match self {
            LookupError::EmptyInput => "Enter a Word",
            LookupError::NotFound => "Word Not Found",
            LookupError::Offline => "No Internet Connection",
            LookupError::ServiceError { .. } | LookupError::MalformedResponse(_) => "Oops!",
        }
    }

    /// User-facing explanation; `term` is the text the user typed.
    pub fn message(&self, term: &str) -> String {
        match self {
            LookupError::EmptyInput => {
                "Please type a word in the search box to look it up.".to_string()
            }
            LookupError::NotFound => format!(
                "Sorry, we couldn't find the word \"{term}\". Please check the spelling and try again."
            ),
            LookupError::Offline => {
                "Please check your internet connection and try again.".to_string()
            }
            LookupError::ServiceError { .. } | LookupError::MalformedResponse(_) => {
                "Something went wrong. Please try again later.".to_string()
            }
        }
    }

    /// Stable tag used in JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::EmptyInput => "empty_input",
            LookupError::NotFound => "not_found",
            LookupError::ServiceError { .. } => "service_error",
            LookupError::Offline => "offline",
            LookupError::MalformedResponse(_) => "malformed_response",
        }
    }
}

/// Failures of the local key-value store. Callers log these and carry on.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store encoding error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to replace store file: {0}")]
    Persist(#[from] tempfile::PersistError),
}
