//! File-backed list of journal entries.
//!
//! The whole document is read on every call and rewritten on every append.
//! Writes go to a temporary file next to the journal which then replaces it,
//! so a failed append leaves the previous document as it was.
//!
//! There is no locking: two processes appending at the same time can lose
//! one of the entries.
use super::journal_entry::JournalEntry;
use crate::errors::{Result, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// On-disk layout: `{"entries": [...]}`, entries in the order they were appended.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct JournalDocument {
    entries: Vec<JournalEntry>,
}

#[derive(Debug, Clone)]
pub struct JournalStore {
    path: PathBuf,
}

impl JournalStore {
    /// Points the store at `path`. Nothing is read or created until first use.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored entry in insertion order. A missing file is an empty journal.
    pub fn load(&self) -> Result<Vec<JournalEntry>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no journal yet");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                }
                .into());
            }
        };

        let document: JournalDocument =
            serde_json::from_str(&content).map_err(|source| StorageError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        if let Some((index, entry)) = document
            .entries
            .iter()
            .enumerate()
            .find(|(_, e)| e.parsed_timestamp().is_none())
        {
            return Err(StorageError::InvalidTimestamp {
                path: self.path.clone(),
                index,
                timestamp: entry.timestamp().to_string(),
            }
            .into());
        }

        debug!(path = %self.path.display(), entries = document.entries.len(), "loaded journal");
        Ok(document.entries)
    }

    /// Loads the journal, appends `entry` and writes the whole journal back.
    pub fn append(&self, entry: &JournalEntry) -> Result<()> {
        let mut entries = self.load()?;
        entries.push(entry.clone());
        self.save(entries)?;
        info!(path = %self.path.display(), timestamp = entry.timestamp(), "appended entry");
        Ok(())
    }

    /// Entries sorted newest first, at most `limit` of them.
    ///
    /// Entries with the same instant keep the most recently appended first.
    pub fn history(&self, limit: Option<usize>) -> Result<Vec<JournalEntry>> {
        let mut entries = self.load()?;
        entries.reverse();
        entries.sort_by_cached_key(|e| {
            std::cmp::Reverse(e.parsed_timestamp().map(|ts| ts.instant()))
        });
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        Ok(entries)
    }

    /// Replaces the journal with `entries`, atomically where the filesystem allows.
    pub(crate) fn save(&self, entries: Vec<JournalEntry>) -> Result<()> {
        let document = JournalDocument { entries };
        let mut content = serde_json::to_string_pretty(&document).map_err(StorageError::Serialize)?;
        content.push('\n');

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|source| self.write_error(source))?;
        self.replace_from(&dir, &content)?;

        debug!(path = %self.path.display(), entries = document.entries.len(), "wrote journal");
        Ok(())
    }

    /// Writes `content` to a temporary file in `staging_dir` and renames it over
    /// the journal. An existing journal keeps its permissions.
    fn replace_from(&self, staging_dir: &Path, content: &str) -> Result<()> {
        let write_err = |source: io::Error| self.write_error(source);

        let mut tmp = tempfile::Builder::new()
            .prefix(".jot")
            .suffix(".tmp")
            .tempfile_in(staging_dir)
            .map_err(write_err)?;
        tmp.write_all(content.as_bytes()).map_err(write_err)?;
        match fs::metadata(&self.path) {
            Ok(existing) => tmp
                .as_file()
                .set_permissions(existing.permissions())
                .map_err(write_err)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(write_err(source).into()),
        }
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    fn write_error(&self, source: io::Error) -> StorageError {
        StorageError::Write {
            path: self.path.clone(),
            source,
        }
    }
}
