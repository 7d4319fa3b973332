pub mod category;
pub mod classifier;
pub mod config;
pub mod errors;
pub mod jot;
pub mod journal;
pub mod lexicon;
pub mod timestamps;

pub use category::{Categories, Category};
pub use classifier::{Classifier, classify};
pub use config::Config;
pub use errors::{JournalError, Result, StorageError, ValidationError};
pub use jot::Jot;
pub use journal::{JournalEntry, JournalStore};
pub use lexicon::Lexicon;
