mod journal_entry;
mod journal_store;

pub use journal_entry::JournalEntry;
pub use journal_store::JournalStore;
