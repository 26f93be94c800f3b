//! # Core Checklist Logic
//!
//! Everything the checklist *is*, with no knowledge of the terminal.
//!
//! ```text
//!                ┌──────────────────────────────┐
//!                │            CORE              │
//!                │                              │
//!                │  • store    (the item list)  │
//!                │  • command  (line → edit)    │
//!                │  • persist  (file format)    │
//!                │  • config   (settings)       │
//!                │                              │
//!                │  Talks to the user only      │
//!                │  through the Console trait.  │
//!                └──────────────┬───────────────┘
//!                               │
//!                               ▼
//!                      ┌─────────────────┐
//!                      │  term adapter   │
//!                      │ (stdin/stdout,  │
//!                      │  crossterm)     │
//!                      └─────────────────┘
//! ```

pub mod command;
pub mod config;
pub mod persist;
pub mod store;
