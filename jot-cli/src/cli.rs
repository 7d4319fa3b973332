use clap::{Parser, Subcommand};
use jot_core::Category;
use std::path::PathBuf;

use crate::render::ColorMode;

/// jot: a journal that sorts what you write into feelings, situations, events, health and people
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Journal file to use instead of the configured one.
    #[arg(long, global = true, env = "JOT_FILE")]
    pub file: Option<PathBuf>,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
    /// Log what jot is doing to stderr. `JOT_LOG` sets the filter otherwise.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Records a new entry (e.g., `jot add Met Sam for lunch. Felt great.`).
    /// Without text, reads piped stdin or opens your $EDITOR.
    Add {
        /// ISO-8601 date-time for the entry (e.g., `2025-08-15T21:00:00`). Defaults to now.
        #[arg(long, short)]
        timestamp: Option<String>,
        /// Print the stored record as JSON.
        #[arg(long)]
        json: bool,
        /// Entry text.
        text: Vec<String>,
    },
    /// Shows stored entries, newest first.
    History {
        /// Show at most N entries.
        #[arg(long = "limit", short = 'n', value_name = "N")]
        limit: Option<usize>,
        /// Only entries with something in this category (feelings, situations, events, health, people).
        #[arg(long, short)]
        category: Option<Category>,
        /// Print entries as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Classifies text without storing it.
    Classify {
        /// Print the categories as JSON.
        #[arg(long)]
        json: bool,
        /// Text to classify. Reads piped stdin or opens your $EDITOR when omitted.
        text: Vec<String>,
    },
    /// Prints the journal file path.
    Path,
}

impl Cli {
    pub fn new() -> Self {
        Cli::parse()
    }
}
