use serde::{Deserialize, Serialize};

use crate::category::Categories;
use crate::classifier::Classifier;
use crate::errors::{Result, ValidationError};
use crate::timestamps::{Timestamp, resolve_timestamp};

/// One journal submission: when it was written, what was written, and what was found in it.
///
/// Entries are immutable once built; fields are only readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JournalEntry {
    timestamp: String,
    text: String,
    categories: Categories,
}

impl JournalEntry {
    /// Validates `text` and `timestamp`, then classifies the text.
    ///
    /// `timestamp` defaults to the current local time. Nothing is stored.
    pub fn new(text: &str, timestamp: Option<&str>, classifier: &Classifier) -> Result<Self> {
        validate_text(text)?;
        let timestamp = resolve_timestamp(timestamp)?;
        Ok(Self {
            timestamp,
            text: text.to_string(),
            categories: classifier.classify(text),
        })
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn categories(&self) -> &Categories {
        &self.categories
    }

    /// Parsed timestamp, `None` if the stored string was tampered with.
    pub fn parsed_timestamp(&self) -> Option<Timestamp> {
        Timestamp::parse(&self.timestamp)
    }
}

fn validate_text(text: &str) -> std::result::Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyText);
    }
    if text.contains('\0') {
        return Err(ValidationError::MalformedText);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::JournalError;
    use crate::lexicon::Lexicon;

    fn classifier() -> Classifier {
        Classifier::new(&Lexicon::default()).unwrap()
    }

    #[test]
    fn keeps_text_verbatim() {
        let text = "  Felt happy.\n";
        let entry = JournalEntry::new(text, Some("2025-08-15T21:00:00"), &classifier()).unwrap();
        assert_eq!(entry.text(), text);
        assert_eq!(entry.timestamp(), "2025-08-15T21:00:00");
        assert_eq!(entry.categories().feelings, vec!["Felt happy."]);
    }

    #[test]
    fn supplied_timestamp_is_normalized() {
        let entry = JournalEntry::new("Rested.", Some("2025-08-15 21:00"), &classifier()).unwrap();
        assert_eq!(entry.timestamp(), "2025-08-15T21:00:00");
    }

    #[test]
    fn missing_timestamp_is_generated() {
        let entry = JournalEntry::new("Rested.", None, &classifier()).unwrap();
        assert!(entry.parsed_timestamp().is_some());
    }

    #[test]
    fn whitespace_only_text_is_rejected() {
        let err = JournalEntry::new(" \n\t ", None, &classifier()).unwrap_err();
        assert!(matches!(err, JournalError::Validation(ValidationError::EmptyText)));
    }

    #[test]
    fn nul_text_is_rejected() {
        let err = JournalEntry::new("bad\0text", None, &classifier()).unwrap_err();
        assert!(matches!(err, JournalError::Validation(ValidationError::MalformedText)));
    }

    #[test]
    fn bad_timestamp_is_rejected() {
        let err = JournalEntry::new("Fine.", Some("last tuesday"), &classifier()).unwrap_err();
        assert!(matches!(
            err,
            JournalError::Validation(ValidationError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn serializes_with_all_fields() {
        let entry = JournalEntry::new("Nothing.", Some("2025-01-02T03:04:05"), &classifier()).unwrap();
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["timestamp"], "2025-01-02T03:04:05");
        assert_eq!(value["text"], "Nothing.");
        assert_eq!(value["categories"].as_object().unwrap().len(), 5);
    }
}
