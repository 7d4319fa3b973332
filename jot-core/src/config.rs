use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{debug, warn};

use crate::category::Category;
use crate::lexicon::Lexicon;

#[derive(Debug, Clone)]
pub struct Config {
    /// JSON document holding every entry.
    pub journal_file: PathBuf,
    /// Preferred editor name/binary (e.g. hx for Helix). Optional; the CLI will fall back to $VISUAL/$EDITOR.
    pub editor: Option<String>,
    /// How many entries `history` shows when no limit is given. `None` shows everything.
    pub history_limit: Option<usize>,
    /// Built-in cue words plus whatever `[lexicon]` adds.
    pub lexicon: Lexicon,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    journal_file: Option<PathBuf>,
    editor: Option<String>,
    history_limit: Option<usize>,
    /// Optional table:
    /// [lexicon]
    /// feelings = ["elated"]
    /// stop_words = ["Mom"]
    lexicon: Option<LexiconConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LexiconConfig {
    feelings: Vec<String>,
    situations: Vec<String>,
    events: Vec<String>,
    health: Vec<String>,
    /// Words that mark a preceding sentence-leading word as a name.
    people: Vec<String>,
    stop_words: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_file_config(FileConfig::default())
    }
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native) and apply defaults.
    ///
    /// A config file that can't be read or parsed is reported and ignored.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_else(|e| {
            warn!("ignoring config file: {e:#}");
            FileConfig::default()
        });
        Ok(Self::from_file_config(file_config))
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        let journal_file = file_config
            .journal_file
            .unwrap_or_else(Self::default_journal_file);

        let mut lexicon = Lexicon::default();
        if let Some(extra) = file_config.lexicon {
            Self::extend_lexicon(&mut lexicon, extra);
        }

        Self {
            journal_file,
            editor: file_config.editor,
            history_limit: file_config.history_limit,
            lexicon,
        }
    }

    /// Default journal document: `{data_dir}/jot/journal_entries.json`
    /// - macOS:   `~/Library/Application Support/jot`
    /// - Linux:   `$XDG_DATA_HOME/jot` or `~/.local/share/jot`
    /// - Windows: `%APPDATA%\jot`
    fn default_journal_file() -> PathBuf {
        let dir = if let Some(base) = BaseDirs::new() {
            base.data_dir().join("jot")
        } else {
            PathBuf::from("./data")
        };
        dir.join("journal_entries.json")
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b.home_dir().join(".config").join("jot").join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("jot").join("config.toml");
            if !v.contains(&native) {
                v.push(native);
            }
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            debug!(path = %path.display(), "reading config");
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }

    /// Merge `[lexicon]` into the built-in cue words.
    fn extend_lexicon(lexicon: &mut Lexicon, extra: LexiconConfig) {
        lexicon.extend(Category::Feelings, extra.feelings);
        lexicon.extend(Category::Situations, extra.situations);
        lexicon.extend(Category::Events, extra.events);
        lexicon.extend(Category::Health, extra.health);
        lexicon.extend(Category::People, extra.people);
        lexicon.extend_stop_words(extra.stop_words);
    }
}
