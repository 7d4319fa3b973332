use crate::render::Renderer;
use anyhow::Result;
use jot_core::{Category, JournalEntry, Jot};

pub fn history_mode(
    jot: &Jot,
    renderer: &Renderer,
    limit: Option<usize>,
    category: Option<Category>,
    json: bool,
) -> Result<()> {
    let limit = limit.or(jot.config.history_limit);
    let entries = match category {
        // Filter before limiting so `-n` counts matching entries.
        Some(category) => {
            let mut entries = jot.history(None)?;
            entries.retain(|e| !e.categories().get(category).is_empty());
            if let Some(limit) = limit {
                entries.truncate(limit);
            }
            entries
        }
        None => jot.history(limit)?,
    };

    if json {
        return renderer.print_json(&entries);
    }
    print_entries(renderer, &entries, category);
    Ok(())
}

fn print_entries(renderer: &Renderer, entries: &[JournalEntry], category: Option<Category>) {
    if entries.is_empty() {
        match category {
            Some(category) => renderer.print_info(&format!("No entries with {category} found.")),
            None => renderer.print_info("No entries found."),
        }
        return;
    }
    renderer.print_info(&format!("{} entries found.", entries.len()));
    renderer.print_entries(entries);
}
