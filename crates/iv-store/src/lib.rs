//! iv-store: signal persistence, indexing, and retrieval.

pub mod index;
pub mod key;
pub mod pattern;
pub mod select;
pub mod store;

pub use index::SignalIndex;
pub use key::{StorageKey, WILDCARD};
pub use pattern::SearchPattern;
pub use select::select_profile;
pub use store::{MatchingProfiles, SignalStore};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Signal not found: {key}")]
    NotFound { key: String },

    #[error("Invalid storage key: {key}")]
    InvalidKey { key: String },

    #[error("Refusing to store an empty pulse sequence")]
    EmptyPulses,
}
