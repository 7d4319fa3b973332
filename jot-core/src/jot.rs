use crate::{
    Config,
    category::Categories,
    classifier::Classifier,
    errors::Result,
    journal::{JournalEntry, JournalStore},
};
use tracing::debug;

pub struct Jot {
    pub config: Config,
    pub classifier: Classifier,
    pub store: JournalStore,
}

impl Jot {
    /// Creates a new `Jot` instance, loading configuration from standard paths.
    pub fn new() -> anyhow::Result<Self> {
        let config = Config::load()?;
        Ok(Self::with_config(config)?)
    }

    /// Creates a new `Jot` instance with a specific `Config`.
    ///
    /// Compiles the configured lexicon. The journal file is not touched until the
    /// first read or write.
    pub fn with_config(config: Config) -> Result<Self> {
        let classifier = Classifier::new(&config.lexicon)?;
        let store = JournalStore::open(&config.journal_file);
        debug!(journal = %config.journal_file.display(), "jot ready");
        Ok(Self {
            config,
            classifier,
            store,
        })
    }

    /// Validates, classifies and appends a new entry, returning it.
    ///
    /// `timestamp` is an ISO-8601 date-time; the current local time is used when absent.
    /// Invalid input is rejected before the journal file is read.
    pub fn record(&self, text: &str, timestamp: Option<&str>) -> Result<JournalEntry> {
        let entry = JournalEntry::new(text, timestamp, &self.classifier)?;
        self.store.append(&entry)?;
        Ok(entry)
    }

    /// Stored entries, newest first. `None` returns all of them.
    pub fn history(&self, limit: Option<usize>) -> Result<Vec<JournalEntry>> {
        self.store.history(limit)
    }

    /// Classifies `text` without storing anything.
    pub fn classify(&self, text: &str) -> Categories {
        self.classifier.classify(text)
    }
}
