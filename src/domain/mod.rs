pub mod entry;
pub mod record;

pub use entry::Entry;
pub use record::SavedRecord;
