//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::io;
use std::ops::Deref;

use tempfile::TempDir;

use crate::core::command::Console;
use crate::core::config::ResolvedConfig;
use crate::core::store::{DEFAULT_MAX_ITEMS, ItemStore};

/// A console driven by a fixed script instead of a terminal. Prompts and
/// reports are captured for assertions.
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    /// Everything `say` printed, in order.
    pub output: Vec<String>,
    /// Every prompt text shown, in order.
    pub prompts: Vec<String>,
}

impl ScriptedConsole {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            inputs: lines.iter().map(|l| l.to_string()).collect(),
            output: Vec::new(),
            prompts: Vec::new(),
        }
    }

    /// Lines of the script not yet consumed.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for ScriptedConsole {
    fn say(&mut self, message: &str) {
        self.output.push(message.to_string());
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        if !text.is_empty() {
            self.prompts.push(text.to_string());
        }
        Ok(self.inputs.pop_front())
    }
}

/// A resolved config whose autosave path lives in a scratch directory that
/// is cleaned up when the value drops.
pub struct TestConfig {
    _dir: TempDir,
    config: ResolvedConfig,
}

impl Deref for TestConfig {
    type Target = ResolvedConfig;

    fn deref(&self) -> &ResolvedConfig {
        &self.config
    }
}

pub fn test_config() -> TestConfig {
    let dir = TempDir::new().unwrap();
    let config = ResolvedConfig {
        max_items: DEFAULT_MAX_ITEMS,
        autosave_path: dir.path().join(".tmplist.txt"),
    };
    TestConfig { _dir: dir, config }
}

/// A store pre-filled with unchecked items.
pub fn test_store(texts: &[&str]) -> ItemStore {
    let mut store = ItemStore::new(DEFAULT_MAX_ITEMS);
    for text in texts {
        store.push(*text);
    }
    store
}
