use anyhow::Result;
use std::io::{self, IsTerminal, Read};
use std::{fs, path::Path, process::Command};
use tracing::debug;

pub fn resolve_editor(editor: &Option<String>) -> String {
    editor
        .as_deref()
        .map(str::to_string)
        .or_else(|| std::env::var("VISUAL").ok())
        .or_else(|| std::env::var("EDITOR").ok())
        .unwrap_or_else(|| "vim".into())
}

pub fn create_editor_buffer(editor_cmd: &str) -> Result<String> {
    let file = tempfile::Builder::new()
        .prefix("jot")
        .suffix(".txt")
        .tempfile()?;

    let path = file.path().to_path_buf();
    open_file_in_editor(editor_cmd, &path)?;
    Ok(fs::read_to_string(&path)?)
}

fn open_file_in_editor(editor_cmd: &str, path: &Path) -> Result<()> {
    debug!(editor = editor_cmd, path = %path.display(), "opening editor");
    let status = Command::new(editor_cmd).arg(path).status()?;
    if !status.success() {
        anyhow::bail!("Editor exited with status {}", status);
    }
    Ok(())
}

/// Text from the command line words, then piped stdin, then the editor.
pub fn read_entry_text(words: &[String], editor: &Option<String>) -> Result<String> {
    if !words.is_empty() {
        return Ok(words.join(" "));
    }
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        let mut buf = String::new();
        stdin.lock().read_to_string(&mut buf)?;
        debug!(bytes = buf.len(), "read entry text from stdin");
        return Ok(buf);
    }
    create_editor_buffer(&resolve_editor(editor))
}
