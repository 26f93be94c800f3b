//! Blocking stdin/stdout implementation of the core's [`Console`] seam.

use std::io::{self, BufRead, Write};

use crate::core::command::Console;

/// The real terminal. Reads are blocking and line-buffered; prompts are
/// flushed so they appear before the cursor parks.
pub struct StdConsole;

impl Console for StdConsole {
    fn say(&mut self, message: &str) {
        println!("{message}");
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        if !text.is_empty() {
            print!("{text}");
            io::stdout().flush()?;
        }
        let mut line = String::new();
        let bytes = io::stdin().lock().read_line(&mut line)?;
        if bytes == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }
}
