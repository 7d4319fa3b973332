use jot_core::{Categories, JournalEntry};
use serde::Serialize;
use termimad::{
    MadSkin,
    crossterm::style::{Attribute, Color, Stylize},
};

#[derive(Clone)]
pub struct RenderOptions {
    pub use_color: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(opts: RenderOptions) -> Self {
        Self {
            skin: journal_skin(),
            opts,
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            println!("{}", md.trim_end());
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            println!("{}", message.with(Color::DarkGrey));
        } else {
            println!("{message}");
        }
    }

    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn print_entry(&self, entry: &JournalEntry) {
        let mut md = format!("## {}\n\n{}\n", entry.timestamp(), entry.text().trim_end());
        let categories = format_categories(entry.categories());
        if !categories.is_empty() {
            md.push('\n');
            md.push_str(&categories);
        }
        self.print_md(&md);
    }

    pub fn print_entries(&self, entries: &[JournalEntry]) {
        for (i, entry) in entries.iter().enumerate() {
            self.print_entry(entry);
            if i + 1 < entries.len() {
                self.print_md("---");
            }
        }
    }

    pub fn print_categories(&self, categories: &Categories) {
        let md = format_categories(categories);
        if md.is_empty() {
            self.print_info("Nothing was classified.");
        } else {
            self.print_md(&md);
        }
    }
}

/// Markdown list of every non-empty category.
fn format_categories(categories: &Categories) -> String {
    let mut md = String::new();
    for (category, snippets) in categories.iter() {
        if snippets.is_empty() {
            continue;
        }
        md.push_str(&format!("**{category}**\n"));
        for snippet in snippets {
            md.push_str(&format!("* {snippet}\n"));
        }
    }
    md
}

fn journal_skin() -> MadSkin {
    const BLUE: Color = Color::Rgb {
        r: 0x61,
        g: 0xAF,
        b: 0xEF,
    };
    const GREEN: Color = Color::Rgb {
        r: 0x98,
        g: 0xC3,
        b: 0x79,
    };
    const YELLOW: Color = Color::Rgb {
        r: 0xE5,
        g: 0xC0,
        b: 0x7B,
    };

    let mut skin = MadSkin::default();
    skin.headers[1].set_fg(BLUE);
    skin.headers[1].add_attr(Attribute::Bold);
    skin.bold.set_fg(YELLOW);
    skin.bullet.set_fg(GREEN);
    skin
}
