use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Entry;

/// An entry as kept in the saved-entries store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedRecord {
    pub entry: Entry,
    pub saved_on: NaiveDate,
    pub status: Option<String>,
}
