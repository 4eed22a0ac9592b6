//! Dictionary lookup client: word definitions from a public service, with a
//! persisted search history, favorites, and a few word games on the side.

pub mod config;
pub mod controller;
pub mod daily;
pub mod error;
pub mod favorites;
pub mod history;
pub mod library;
pub mod lookup;
pub mod persist;
pub mod record;
pub mod render;
pub mod session;
pub mod store;
pub mod theme;
pub mod wordplay;

pub use config::ClientConfig;
pub use controller::{Action, Controller};
pub use error::{LookupError, StoreError};
pub use library::Library;
pub use lookup::{Dictionary, LookupClient};
pub use persist::Persistence;
pub use record::WordRecord;
pub use render::{Render, View};
pub use session::{Phase, SessionState};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use theme::Theme;
