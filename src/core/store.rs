//! # Item Store
//!
//! The ordered checklist itself: a bounded sequence of `Item`s, each a line
//! of text plus a completion flag. Identity is positional — the user sees
//! 1-based indices, and removing or reordering items changes the identity of
//! everything after them.
//!
//! All operations here are pure data transformations. Reporting invalid
//! indices to the user is the interpreter's job; this module only says what
//! succeeded.

use log::debug;

/// Default capacity when the config doesn't override it.
pub const DEFAULT_MAX_ITEMS: usize = 100;

/// Longest item text we store, in bytes. Matches the line-length bound of
/// the on-disk format.
pub const MAX_TEXT_BYTES: usize = 255;

/// One checklist entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub text: String,
    pub completed: bool,
}

impl Item {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}

/// Ordered, capacity-bounded collection of items. Owned exclusively by the
/// session; every command mutates it in place.
pub struct ItemStore {
    items: Vec<Item>,
    max_items: usize,
}

/// What a bulk remove actually did.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RemoveOutcome {
    /// How many items were deleted.
    pub removed: usize,
    /// 1-based indices that were out of range, in input order.
    pub invalid: Vec<usize>,
}

impl ItemStore {
    pub fn new(max_items: usize) -> Self {
        Self {
            items: Vec::new(),
            max_items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.max_items
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// True when `index` (1-based) refers to an existing item.
    pub fn in_range(&self, index: usize) -> bool {
        index >= 1 && index <= self.items.len()
    }

    /// Flip the completion flag of the 1-based `index`. Returns false (and
    /// changes nothing) when the index is out of range.
    pub fn toggle(&mut self, index: usize) -> bool {
        if !self.in_range(index) {
            return false;
        }
        let item = &mut self.items[index - 1];
        item.completed = !item.completed;
        true
    }

    /// Append an unchecked item. Returns false once the store is at
    /// capacity — exceeding the bound is a silent stop, not an error.
    /// Text longer than [`MAX_TEXT_BYTES`] is clipped on a char boundary.
    pub fn push(&mut self, text: impl Into<String>) -> bool {
        if self.is_full() {
            debug!("push rejected: store at capacity ({})", self.max_items);
            return false;
        }
        self.items.push(Item::new(clip_text(text.into())));
        true
    }

    /// Swap two 1-based positions (text and state both move). Returns false
    /// when either index is out of range; the list is untouched in that case.
    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        if !self.in_range(a) || !self.in_range(b) {
            return false;
        }
        self.items.swap(a - 1, b - 1);
        true
    }

    /// Remove the given 1-based indices.
    ///
    /// Every index is validated against the list *before* any removal, then
    /// the unique valid ones are deleted from highest to lowest, so each
    /// index refers to the position the user saw on screen. Earlier versions
    /// of this tool applied raw indices against the live, shrinking array
    /// (removing "2 3" from a 4-item list deleted items 2 and 4); that
    /// behavior change is pinned down in the tests.
    pub fn remove_all(&mut self, indices: &[usize]) -> RemoveOutcome {
        let mut outcome = RemoveOutcome::default();
        let mut valid: Vec<usize> = Vec::new();
        for &index in indices {
            if self.in_range(index) {
                if !valid.contains(&index) {
                    valid.push(index);
                }
            } else {
                outcome.invalid.push(index);
            }
        }
        valid.sort_unstable();
        for &index in valid.iter().rev() {
            self.items.remove(index - 1);
            outcome.removed += 1;
        }
        outcome
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }

    /// Completed fraction in `[0.0, 1.0]`. An empty list is 0, not a
    /// division by zero.
    pub fn progress(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        self.completed_count() as f64 / self.items.len() as f64
    }

    /// Drop all items (used by the `new` command before re-initialization).
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replace the whole list with freshly loaded items. Loaded text is
    /// held to the same bounds as typed text: clipped to [`MAX_TEXT_BYTES`],
    /// and the list clipped to capacity.
    pub fn replace(&mut self, items: Vec<Item>) {
        self.items = items
            .into_iter()
            .map(|mut item| {
                item.text = clip_text(item.text);
                item
            })
            .collect();
        self.items.truncate(self.max_items);
    }
}

/// Truncate to at most [`MAX_TEXT_BYTES`] without splitting a char.
fn clip_text(mut text: String) -> String {
    if text.len() > MAX_TEXT_BYTES {
        let mut end = MAX_TEXT_BYTES;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
    text
}
