//! # Command Interpreter
//!
//! One input line per turn. The line is parsed into a tagged [`Command`]
//! and applied against the store and the file binding:
//!
//! ```text
//! line  →  parse_command()  →  Command  →  interpret()  →  TurnOutcome
//! ```
//!
//! Commands that need more input (`add` items, `change` pairs, `remove`
//! indices, `save` prompts) read follow-up lines through the [`Console`]
//! trait. That seam is the only way the interpreter touches the terminal,
//! so tests drive it with a scripted console instead of stdin.
//!
//! Error policy: user input can never crash a turn. Bad indices and
//! malformed pairs are reported per token and the rest of the command still
//! applies; file I/O failures are reported and leave the in-memory list
//! intact. Only a failure of the input stream itself propagates out.

use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::core::config::ResolvedConfig;
use crate::core::persist;
use crate::core::store::ItemStore;

/// Line-oriented user I/O seam. The session implements this over
/// stdin/stdout; tests implement it over scripted vectors.
pub trait Console {
    /// Print a full line to the user.
    fn say(&mut self, message: &str);

    /// Print `text` without a newline, then read one newline-stripped line.
    /// `None` means the input stream is exhausted.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>>;

    /// Read one line with no prompt text.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.prompt("")
    }

    /// Yes/no question. Anything starting with `y`/`Y` is yes; everything
    /// else (including end of input) is no.
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.prompt(&format!("{question} (Y/N): "))?;
        Ok(matches!(
            answer.as_deref().map(str::trim),
            Some(a) if a.to_ascii_lowercase().starts_with('y')
        ))
    }
}

/// Whether the in-memory list is associated with an explicit user-chosen
/// file. Unbound sessions are transient and autosave on exit.
#[derive(Debug, Default)]
pub struct FileBinding {
    path: Option<PathBuf>,
}

impl FileBinding {
    pub fn unbound() -> Self {
        Self::default()
    }

    pub fn bound_to(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn is_bound(&self) -> bool {
        self.path.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn bind(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    pub fn unbind(&mut self) {
        self.path = None;
    }
}

/// A whitespace token from an index list. `value` is `None` for anything
/// that isn't a non-negative integer; the interpreter reports those by their
/// raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexToken {
    pub raw: String,
    pub value: Option<usize>,
}

/// One comma-separated entry from a `change` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairToken {
    /// A well-formed `i>j` swap request (1-based, not yet range-checked).
    Pair(usize, usize),
    /// Anything that didn't parse; carried verbatim for the report.
    Malformed(String),
}

/// Everything a single input line can mean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Add,
    Change,
    Remove,
    Save,
    New,
    /// The default: a list of indices to toggle.
    Toggle(Vec<IndexToken>),
}

/// What the session loop should do after a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Continue,
    /// Reset the list and binding and re-run startup (`new`).
    Restart,
    Exit,
}

/// Classify one trimmed input line. Keywords are case-sensitive exact
/// matches; everything else is treated as a toggle index list.
pub fn parse_command(line: &str) -> Command {
    match line.trim() {
        "0" => Command::Exit,
        "add" => Command::Add,
        "change" => Command::Change,
        "remove" => Command::Remove,
        "save" => Command::Save,
        "new" => Command::New,
        other => Command::Toggle(parse_indices(other)),
    }
}

/// Split on whitespace and parse each token as a 1-based index.
pub fn parse_indices(input: &str) -> Vec<IndexToken> {
    input
        .split_whitespace()
        .map(|token| IndexToken {
            raw: token.to_string(),
            value: token.parse().ok(),
        })
        .collect()
}

/// Parse a comma-separated list of `i>j` swap pairs. Each entry parses
/// independently; a bad entry becomes `Malformed` rather than poisoning the
/// rest of the line.
pub fn parse_swap_pairs(input: &str) -> Vec<PairToken> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let parsed = entry.split_once('>').and_then(|(a, b)| {
                Some(PairToken::Pair(
                    a.trim().parse().ok()?,
                    b.trim().parse().ok()?,
                ))
            });
            parsed.unwrap_or_else(|| PairToken::Malformed(entry.to_string()))
        })
        .collect()
}

/// Apply one command. Mutates the store and binding, reads any follow-up
/// lines it needs, and tells the session loop how to proceed.
pub fn interpret(
    command: Command,
    store: &mut ItemStore,
    binding: &mut FileBinding,
    config: &ResolvedConfig,
    console: &mut dyn Console,
) -> io::Result<TurnOutcome> {
    match command {
        Command::Exit => {
            if let Some(path) = binding.path().map(Path::to_path_buf) {
                let question =
                    "You have an opened list. Do you want to save the current list before exiting?";
                if console.confirm(question)? {
                    save_and_report(store, &path, console);
                }
            } else {
                persist::autosave(store.items(), &config.autosave_path);
            }
            info!("Exit requested");
            Ok(TurnOutcome::Exit)
        }

        Command::Add => {
            console.say("Enter items one by one (Enter 0 to finish):");
            while !store.is_full() {
                let Some(line) = console.read_line()? else { break };
                if line.trim() == "0" {
                    break;
                }
                store.push(line);
            }
            Ok(TurnOutcome::Continue)
        }

        Command::Change => {
            let prompt =
                "Enter the changes to the items in the format 'index1>index2,index3>index4,...': ";
            let Some(line) = console.prompt(prompt)? else {
                return Ok(TurnOutcome::Continue);
            };
            for token in parse_swap_pairs(&line) {
                match token {
                    PairToken::Pair(a, b) => {
                        if !store.swap(a, b) {
                            console.say(&format!("Invalid indices: {a} or {b}. Skipping."));
                        }
                    }
                    PairToken::Malformed(raw) => {
                        console.say(&format!("Malformed pair '{raw}'. Skipping."));
                    }
                }
            }
            Ok(TurnOutcome::Continue)
        }

        Command::Remove => {
            let prompt = "Enter the indices of items to remove (separated by spaces): ";
            let Some(line) = console.prompt(prompt)? else {
                return Ok(TurnOutcome::Continue);
            };
            let mut indices = Vec::new();
            for token in parse_indices(&line) {
                match token.value {
                    Some(value) => indices.push(value),
                    None => console.say(&format!("Invalid index: {}. Skipping.", token.raw)),
                }
            }
            let outcome = store.remove_all(&indices);
            for index in outcome.invalid {
                console.say(&format!("Invalid index: {index}. Skipping."));
            }
            Ok(TurnOutcome::Continue)
        }

        Command::Save => {
            if let Some(path) = binding.path().map(Path::to_path_buf) {
                save_and_report(store, &path, console);
            } else {
                let Some(dir) = console.prompt("Enter the directory path to save the file: ")?
                else {
                    return Ok(TurnOutcome::Continue);
                };
                let Some(name) = console.prompt("Enter the file name: ")? else {
                    return Ok(TurnOutcome::Continue);
                };
                let path = Path::new(dir.trim()).join(name.trim());
                // Bind only once the save actually lands; a failed save
                // leaves the session transient.
                if save_and_report(store, &path, console) {
                    binding.bind(path);
                }
            }
            Ok(TurnOutcome::Continue)
        }

        Command::New => {
            if binding.is_bound() {
                let question = "You have an opened list. Do you want to save the current list before starting a new one?";
                if console.confirm(question)?
                    && let Some(path) = binding.path().map(Path::to_path_buf)
                {
                    save_and_report(store, &path, console);
                }
            }
            info!("Restart requested");
            Ok(TurnOutcome::Restart)
        }

        Command::Toggle(tokens) => {
            for token in tokens {
                let toggled = token.value.is_some_and(|index| store.toggle(index));
                if !toggled {
                    console.say(&format!("Invalid index: {}. Skipping.", token.raw));
                }
            }
            Ok(TurnOutcome::Continue)
        }
    }
}

/// Save with a user-facing report. Returns true on success.
fn save_and_report(store: &ItemStore, path: &Path, console: &mut dyn Console) -> bool {
    match persist::save(store.items(), path) {
        Ok(()) => {
            console.say(&format!("File saved successfully as {}", path.display()));
            true
        }
        Err(e) => {
            warn!("Save to {} failed: {}", path.display(), e);
            console.say(&format!(
                "Error: Unable to create file in the specified directory ({e})."
            ));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedConsole, test_config, test_store};

    fn run(
        line: &str,
        store: &mut ItemStore,
        binding: &mut FileBinding,
        console: &mut ScriptedConsole,
    ) -> TurnOutcome {
        let config = test_config();
        interpret(parse_command(line), store, binding, &config, console).unwrap()
    }

    #[test]
    fn test_parse_command_keywords() {
        assert_eq!(parse_command("0"), Command::Exit);
        assert_eq!(parse_command("  add "), Command::Add);
        assert_eq!(parse_command("change"), Command::Change);
        assert_eq!(parse_command("remove"), Command::Remove);
        assert_eq!(parse_command("save"), Command::Save);
        assert_eq!(parse_command("new"), Command::New);
    }

    #[test]
    fn test_parse_command_keywords_are_case_sensitive() {
        // "Add" is not the add keyword; it falls through to a toggle list
        match parse_command("Add") {
            Command::Toggle(tokens) => {
                assert_eq!(tokens.len(), 1);
                assert_eq!(tokens[0].value, None);
            }
            other => panic!("expected Toggle, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_indices_mixed_tokens() {
        let tokens = parse_indices("1 x 3");
        assert_eq!(tokens[0].value, Some(1));
        assert_eq!(tokens[1].value, None);
        assert_eq!(tokens[1].raw, "x");
        assert_eq!(tokens[2].value, Some(3));
    }

    #[test]
    fn test_parse_swap_pairs_graceful_on_malformed() {
        let pairs = parse_swap_pairs("1>2, nope, 3>x, 4 > 1,");
        assert_eq!(
            pairs,
            vec![
                PairToken::Pair(1, 2),
                PairToken::Malformed("nope".to_string()),
                PairToken::Malformed("3>x".to_string()),
                PairToken::Pair(4, 1),
            ]
        );
    }

    #[test]
    fn test_toggle_command_applies_valid_and_reports_invalid() {
        let mut store = test_store(&["A", "B", "C"]);
        let mut binding = FileBinding::unbound();
        let mut console = ScriptedConsole::new(&[]);
        let outcome = run("2 9 x", &mut store, &mut binding, &mut console);
        assert_eq!(outcome, TurnOutcome::Continue);
        assert!(store.items()[1].completed);
        assert_eq!(
            console.output,
            vec![
                "Invalid index: 9. Skipping.",
                "Invalid index: x. Skipping.",
            ]
        );
    }

    #[test]
    fn test_toggle_out_of_range_leaves_list_unchanged() {
        let mut store = test_store(&["A", "B"]);
        let mut binding = FileBinding::unbound();
        let mut console = ScriptedConsole::new(&[]);
        run("3", &mut store, &mut binding, &mut console);
        assert!(store.items().iter().all(|item| !item.completed));
        assert_eq!(console.output.len(), 1);
    }

    #[test]
    fn test_add_until_sentinel() {
        let mut store = test_store(&[]);
        let mut binding = FileBinding::unbound();
        let mut console = ScriptedConsole::new(&["Buy milk", "Call dentist", "0", "ignored"]);
        run("add", &mut store, &mut binding, &mut console);
        assert_eq!(store.len(), 2);
        assert_eq!(store.items()[0].text, "Buy milk");
        assert!(!store.items()[1].completed);
    }

    #[test]
    fn test_add_stops_reading_at_capacity() {
        let mut store = ItemStore::new(2);
        let mut binding = FileBinding::unbound();
        let mut console = ScriptedConsole::new(&["one", "two", "three", "0"]);
        let config = test_config();
        interpret(
            parse_command("add"),
            &mut store,
            &mut binding,
            &config,
            &mut console,
        )
        .unwrap();
        assert_eq!(store.len(), 2);
        // "three" and "0" are left unread — the sub-mode ends at capacity
        assert_eq!(console.remaining(), 2);
    }

    #[test]
    fn test_add_ends_on_eof() {
        let mut store = test_store(&[]);
        let mut binding = FileBinding::unbound();
        let mut console = ScriptedConsole::new(&["only one"]);
        let outcome = run("add", &mut store, &mut binding, &mut console);
        assert_eq!(outcome, TurnOutcome::Continue);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_change_applies_pairs_in_order_against_mutated_list() {
        let mut store = test_store(&["A", "B", "C"]);
        let mut binding = FileBinding::unbound();
        // First swap puts C at position 1; second swaps it onward
        let mut console = ScriptedConsole::new(&["1>3,1>2"]);
        run("change", &mut store, &mut binding, &mut console);
        let texts: Vec<_> = store.items().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, ["B", "C", "A"]);
    }

    #[test]
    fn test_change_reports_malformed_and_out_of_range_pairs() {
        let mut store = test_store(&["A", "B"]);
        let mut binding = FileBinding::unbound();
        let mut console = ScriptedConsole::new(&["1>9,garbage,2>1"]);
        run("change", &mut store, &mut binding, &mut console);
        assert_eq!(
            console.output,
            vec![
                "Invalid indices: 1 or 9. Skipping.",
                "Malformed pair 'garbage'. Skipping.",
            ]
        );
        // The valid trailing pair still applied
        assert_eq!(store.items()[0].text, "B");
    }

    #[test]
    fn test_remove_fixed_semantics_scenario() {
        // Earlier versions walked raw indices against the shrinking array
        // and would leave [A, C] here. The corrected semantics resolve both
        // indices against the displayed positions, leaving [A, D].
        let mut store = test_store(&["A", "B", "C", "D"]);
        let mut binding = FileBinding::unbound();
        let mut console = ScriptedConsole::new(&["2 3"]);
        run("remove", &mut store, &mut binding, &mut console);
        let texts: Vec<_> = store.items().iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, ["A", "D"]);
    }

    #[test]
    fn test_remove_reports_each_bad_token() {
        let mut store = test_store(&["A", "B"]);
        let mut binding = FileBinding::unbound();
        let mut console = ScriptedConsole::new(&["x 7 1"]);
        run("remove", &mut store, &mut binding, &mut console);
        assert_eq!(store.len(), 1);
        assert_eq!(
            console.output,
            vec![
                "Invalid index: x. Skipping.",
                "Invalid index: 7. Skipping.",
            ]
        );
    }

    #[test]
    fn test_save_unbound_prompts_joins_and_binds() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = test_store(&["A"]);
        let mut binding = FileBinding::unbound();
        let dir_line = dir.path().to_str().unwrap().to_string();
        let mut console = ScriptedConsole::new(&[&dir_line, "list.txt"]);
        run("save", &mut store, &mut binding, &mut console);
        let expected = dir.path().join("list.txt");
        assert_eq!(binding.path(), Some(expected.as_path()));
        assert!(expected.exists());
    }

    #[test]
    fn test_save_to_bad_directory_reports_and_stays_unbound() {
        let mut store = test_store(&["A"]);
        let mut binding = FileBinding::unbound();
        let mut console = ScriptedConsole::new(&["/no/such/dir", "list.txt"]);
        let outcome = run("save", &mut store, &mut binding, &mut console);
        assert_eq!(outcome, TurnOutcome::Continue);
        assert!(!binding.is_bound());
        assert!(console.output[0].starts_with("Error:"));
        // List untouched
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_save_bound_writes_without_prompting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bound.txt");
        let mut store = test_store(&["A", "B"]);
        store.toggle(1);
        let mut binding = FileBinding::bound_to(&path);
        let mut console = ScriptedConsole::new(&[]);
        run("save", &mut store, &mut binding, &mut console);
        let saved = std::fs::read_to_string(&path).unwrap();
        assert_eq!(saved, "[X] A\n[ ] B\n");
    }

    #[test]
    fn test_exit_unbound_autosaves() {
        let mut store = test_store(&["A"]);
        let mut binding = FileBinding::unbound();
        let mut console = ScriptedConsole::new(&[]);
        let config = test_config();
        let outcome = interpret(
            parse_command("0"),
            &mut store,
            &mut binding,
            &config,
            &mut console,
        )
        .unwrap();
        assert_eq!(outcome, TurnOutcome::Exit);
        assert!(config.autosave_path.exists());
    }

    #[test]
    fn test_exit_bound_saves_only_on_yes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bound.txt");
        let mut store = test_store(&["A"]);
        let mut binding = FileBinding::bound_to(&path);

        let mut console = ScriptedConsole::new(&["n"]);
        let outcome = run("0", &mut store, &mut binding, &mut console);
        assert_eq!(outcome, TurnOutcome::Exit);
        assert!(!path.exists());

        let mut console = ScriptedConsole::new(&["Y"]);
        run("0", &mut store, &mut binding, &mut console);
        assert!(path.exists());
    }

    #[test]
    fn test_new_bound_offers_save_then_restarts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bound.txt");
        let mut store = test_store(&["A"]);
        let mut binding = FileBinding::bound_to(&path);
        let mut console = ScriptedConsole::new(&["y"]);
        let outcome = run("new", &mut store, &mut binding, &mut console);
        assert_eq!(outcome, TurnOutcome::Restart);
        assert!(path.exists());
    }

    #[test]
    fn test_new_unbound_restarts_without_prompting() {
        let mut store = test_store(&[]);
        let mut binding = FileBinding::unbound();
        let mut console = ScriptedConsole::new(&[]);
        let outcome = run("new", &mut store, &mut binding, &mut console);
        assert_eq!(outcome, TurnOutcome::Restart);
        assert!(console.output.is_empty());
    }
}
