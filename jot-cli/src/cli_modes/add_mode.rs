use super::editor_utils::read_entry_text;
use crate::render::Renderer;
use anyhow::Result;
use jot_core::Jot;

pub fn add_mode(
    jot: &Jot,
    renderer: &Renderer,
    words: &[String],
    timestamp: Option<&str>,
    json: bool,
) -> Result<()> {
    let input = read_entry_text(words, &jot.config.editor)?;
    let entry = jot.record(input.trim(), timestamp)?;

    if json {
        return renderer.print_json(&entry);
    }
    renderer.print_info(&format!(
        "Journal entry saved to {}",
        jot.store.path().display()
    ));
    renderer.print_entry(&entry);
    Ok(())
}
