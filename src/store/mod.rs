pub mod sqlite;

use crate::app::Result;
use crate::domain::{Entry, SavedRecord};

pub use sqlite::SqliteStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// A record with the same identifier was already present and is kept as is.
    AlreadySaved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    NotSaved,
}

/// Saved entries, keyed by identifier.
pub trait Store {
    fn save(&self, entry: &Entry) -> Result<SaveOutcome>;
    fn delete(&self, identifier: &str) -> Result<DeleteOutcome>;
    fn exists(&self, identifier: &str) -> Result<bool>;
    fn get(&self, identifier: &str) -> Result<Option<SavedRecord>>;
    fn all(&self) -> Result<Vec<SavedRecord>>;
}
