//! # Persistence
//!
//! The on-disk format is one item per line, UTF-8:
//!
//! ```text
//! [X] Buy milk
//! [ ] Call dentist
//! Untracked legacy line treated as unchecked text
//! ```
//!
//! Loading is deliberately tolerant: a line without a recognized `"[ ] "` /
//! `"[X] "` prefix becomes an unchecked item with the whole line as text.
//! The format does no escaping, so text that happens to start with a bracket
//! prefix is lossy on round-trip.
//!
//! Saves go through a temp file + rename so a failed write never leaves a
//! half-truncated list behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::core::store::Item;

/// File name of the implicit autosave, placed in the home directory.
pub const AUTOSAVE_FILE_NAME: &str = ".tmplist.txt";

/// `${HOME}/.tmplist.txt`, falling back to the current directory when no
/// home directory can be determined.
pub fn default_autosave_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(AUTOSAVE_FILE_NAME)
}

/// Parse one stored line into an item.
///
/// Only the three bracket characters select the prefix; the fourth
/// character is stripped along with it whatever it is, so `"[X]xyz"` loads
/// as a checked `"yz"`. Lines where stripping four bytes would split a
/// multi-byte char fall through to the legacy whole-line rule.
fn parse_line(line: &str) -> Item {
    if line.len() >= 4
        && (line.starts_with("[ ]") || line.starts_with("[X]"))
        && let Some(text) = line.get(4..)
    {
        Item {
            completed: line.as_bytes()[1] == b'X',
            text: text.to_string(),
        }
    } else {
        Item::new(line)
    }
}

fn format_line(item: &Item) -> String {
    let mark = if item.completed { "[X]" } else { "[ ]" };
    format!("{} {}", mark, item.text)
}

/// Read a list file. Errors are returned to the caller, who reports them and
/// leaves the in-memory list as it was.
pub fn load(path: &Path) -> io::Result<Vec<Item>> {
    let contents = fs::read_to_string(path)?;
    let items: Vec<Item> = contents.lines().map(parse_line).collect();
    debug!("Loaded {} item(s) from {}", items.len(), path.display());
    Ok(items)
}

/// Write the list to `path`, replacing whatever was there. Goes through a
/// `.tmp` sibling and a rename so a failed write leaves the old file intact.
pub fn save(items: &[Item], path: &Path) -> io::Result<()> {
    let mut out = String::new();
    for item in items {
        out.push_str(&format_line(item));
        out.push('\n');
    }
    let tmp_path = tmp_sibling(path);
    fs::write(&tmp_path, out)?;
    fs::rename(&tmp_path, path)?;
    debug!("Saved {} item(s) to {}", items.len(), path.display());
    Ok(())
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Silent best-effort save to the autosave location. Only called when an
/// unbound session exits; failure is logged, never surfaced.
pub fn autosave(items: &[Item], autosave_path: &Path) {
    if let Err(e) = save(items, autosave_path) {
        warn!("Autosave to {} failed: {}", autosave_path.display(), e);
    }
}

pub fn autosave_exists(autosave_path: &Path) -> bool {
    autosave_path.exists()
}

/// Delete a consumed autosave after it has been loaded into the session.
pub fn remove_autosave(autosave_path: &Path) {
    if let Err(e) = fs::remove_file(autosave_path) {
        warn!(
            "Could not remove autosave {}: {}",
            autosave_path.display(),
            e
        );
    }
}
