//! Error types for the journal core.
//!
//! Callers get one of two families: [`ValidationError`] for bad input, raised
//! before any storage access, and [`StorageError`] for problems with the
//! journal document. Classification itself never fails.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Input rejected before anything touches the journal document.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("entry text is empty")]
    EmptyText,

    #[error("entry text contains a NUL character")]
    MalformedText,

    #[error("'{input}' is not an ISO-8601 date-time (e.g. 2025-08-15T21:00:00)")]
    InvalidTimestamp { input: String },
}

/// The journal document could not be read, written or understood.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a valid journal document: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: entry #{index} has an unreadable timestamp '{timestamp}'", path.display())]
    InvalidTimestamp {
        path: PathBuf,
        index: usize,
        timestamp: String,
    },

    #[error("serializing journal document: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Everything the core can fail with.
#[derive(Debug, Error)]
pub enum JournalError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("building lexicon matcher: {0}")]
    Lexicon(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, JournalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_converts_into_journal_error() {
        let err: JournalError = ValidationError::EmptyText.into();
        assert!(matches!(err, JournalError::Validation(ValidationError::EmptyText)));
        assert_eq!(err.to_string(), "entry text is empty");
    }

    #[test]
    fn storage_messages_name_the_file() {
        let err = StorageError::Read {
            path: PathBuf::from("/tmp/journal.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/journal.json"));
        assert!(msg.contains("denied"));
    }
}
