//! List and progress-bar rendering.
//!
//! Output is plain lines with crossterm styling: completed items in green
//! strikethrough, pending items in bold red, and a blue progress bar sized
//! to the width the caller measured for this frame.

use std::io::{self, Write};

use crossterm::style::Stylize;
use unicode_width::UnicodeWidthChar;

use crate::core::store::ItemStore;

/// Current terminal width in columns, measured now. Falls back to 80 when
/// the size can't be queried (e.g. output is not a tty).
pub fn terminal_width() -> u16 {
    crossterm::terminal::size().map(|(w, _)| w).unwrap_or(80)
}

/// Draw the numbered item lines followed by the progress bar.
pub fn render(out: &mut impl Write, store: &ItemStore, width: u16) -> io::Result<()> {
    let columns = width.max(1) as usize;
    for (i, item) in store.items().iter().enumerate() {
        let line = clip(&format!("{}. {}", i + 1, item.text), columns);
        if item.completed {
            writeln!(out, "{}", line.green().crossed_out())?;
        } else {
            writeln!(out, "{}", line.red().bold())?;
        }
    }
    render_progress(out, store, columns)
}

fn render_progress(out: &mut impl Write, store: &ItemStore, columns: usize) -> io::Result<()> {
    let progress = store.progress();
    let filled = (progress * columns as f64) as usize;
    let mut bar = "█".repeat(filled.min(columns));
    bar.push_str(&" ".repeat(columns - filled.min(columns)));
    writeln!(out)?;
    writeln!(out, "{}", bar.blue())?;
    writeln!(out, "{}", format!("{}%", (progress * 100.0) as u32).bold())?;
    Ok(())
}

/// Truncate to at most `columns` display cells, never splitting a wide char.
fn clip(text: &str, columns: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > columns {
            break;
        }
        out.push(c);
        used += w;
    }
    out
}
