use super::editor_utils::read_entry_text;
use crate::render::Renderer;
use anyhow::Result;
use jot_core::Jot;

pub fn classify_mode(jot: &Jot, renderer: &Renderer, words: &[String], json: bool) -> Result<()> {
    let input = read_entry_text(words, &jot.config.editor)?;
    let categories = jot.classify(input.trim());
    if json {
        return renderer.print_json(&categories);
    }
    renderer.print_categories(&categories);
    Ok(())
}
