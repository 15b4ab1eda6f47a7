//! Medicine-name suggestions.
//!
//! Pipeline: host keystroke → query ticket → source fetch → session
//! completion (stale responses discarded).

mod session;
mod vocabulary;

pub use session::*;
pub use vocabulary::*;

use thiserror::Error;

/// Suggestion errors.
#[derive(Error, Debug)]
pub enum SuggestError {
    #[error("Invalid vocabulary data: {0}")]
    VocabularyData(#[from] serde_json::Error),
}

pub type SuggestResult<T> = Result<T, SuggestError>;

/// A source of medicine-name suggestions for a query string.
///
/// The bundled [`MedicineVocabulary`] answers synchronously; a host may also
/// supply a remote source and complete lookups through a
/// [`SuggestionSession`] ticket.
pub trait SuggestionSource {
    /// Fetch candidate names matching `query`, at most `limit`.
    fn fetch(&self, query: &str, limit: usize) -> SuggestResult<Vec<String>>;
}
