//! # Terminal Adapter
//!
//! The crossterm-specific layer: owns stdin/stdout, clears the screen, and
//! runs the clear → render → prompt → interpret loop. This is the only
//! module that knows a terminal exists; the core sees it as a [`Console`].
//!
//! Terminal width is re-queried right before every render and passed down
//! as a parameter — there is no global width and no resize signal handler,
//! since a fresh query each frame picks up resizes for free.

mod console;
mod render;

use std::io::{self, stdout};
use std::path::{Path, PathBuf};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use log::{info, warn};

use crate::core::command::{Command, Console, FileBinding, TurnOutcome, interpret, parse_command};
use crate::core::config::ResolvedConfig;
use crate::core::persist;
use crate::core::store::ItemStore;
use crate::term::console::StdConsole;
use crate::term::render::{render, terminal_width};

const COMMAND_PROMPT: &str = "\nEnter the indices of items to toggle completion (separated by \
    spaces), 'add' to add new items, 'change' to reorder items, 'remove' to delete items, \
    'save' to save the list, 'new' to open a new list, or '0' to exit: ";

/// Run one interactive session to completion. Returns when the user exits.
pub fn run(file_arg: Option<PathBuf>, config: &ResolvedConfig) -> io::Result<()> {
    let mut console = StdConsole;
    let mut store = ItemStore::new(config.max_items);
    let mut binding = FileBinding::unbound();

    initialize(
        file_arg.as_deref(),
        &mut store,
        &mut binding,
        config,
        &mut console,
    )?;

    loop {
        clear_screen()?;
        let width = terminal_width();
        render(&mut stdout(), &store, width)?;

        let command = match console.prompt(COMMAND_PROMPT)? {
            Some(line) => parse_command(&line),
            // stdin closed: same path as the exit command
            None => Command::Exit,
        };

        match interpret(command, &mut store, &mut binding, config, &mut console)? {
            TurnOutcome::Continue => {}
            TurnOutcome::Restart => {
                store.clear();
                binding.unbind();
                clear_screen()?;
                initialize(None, &mut store, &mut binding, config, &mut console)?;
            }
            TurnOutcome::Exit => break,
        }
    }
    info!("Session ended");
    Ok(())
}

fn clear_screen() -> io::Result<()> {
    execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0))
}

/// Startup sequence: CLI file → stale autosave → manual choice.
///
/// A CLI path binds the session even when the load fails, so a later `save`
/// targets the requested file. A consumed autosave leaves the session
/// unbound — the list came from the transient stash, and the stash is
/// deleted once loaded.
fn initialize(
    file_arg: Option<&Path>,
    store: &mut ItemStore,
    binding: &mut FileBinding,
    config: &ResolvedConfig,
    console: &mut dyn Console,
) -> io::Result<()> {
    if let Some(path) = file_arg {
        load_and_report(store, path, console);
        binding.bind(path);
        return Ok(());
    }

    if persist::autosave_exists(&config.autosave_path)
        && console.confirm("A temporary saved list was found. Do you want to load it?")?
        && load_and_report(store, &config.autosave_path, console)
    {
        persist::remove_autosave(&config.autosave_path);
    }

    if store.is_empty() {
        if console.confirm("Load items from a file?")? {
            if let Some(line) = console.prompt("Enter the file path: ")? {
                let path = PathBuf::from(line.trim());
                load_and_report(store, &path, console);
                binding.bind(path);
            }
        } else {
            console.say("Enter items one by one (Enter 0 to finish):");
            while !store.is_full() {
                let Some(line) = console.read_line()? else { break };
                if line.trim() == "0" {
                    break;
                }
                store.push(line);
            }
        }
    }
    Ok(())
}

/// Load with a user-facing report. Returns true on success.
fn load_and_report(store: &mut ItemStore, path: &Path, console: &mut dyn Console) -> bool {
    match persist::load(path) {
        Ok(items) => {
            store.replace(items);
            console.say("File loaded successfully.");
            true
        }
        Err(e) => {
            warn!("Load from {} failed: {}", path.display(), e);
            console.say(&format!(
                "Error: File not found or could not be opened ({e})."
            ));
            false
        }
    }
}
