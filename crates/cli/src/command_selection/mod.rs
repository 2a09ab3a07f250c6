//! Interactive workspace selection.
//!
//! This module provides the line prompt used to pick a workspace: a single
//! input line with live, prefix-filtered suggestions drawn below it.
//!
//! # User Interface
//!
//! The prompt supports:
//! - Typing to filter suggestions by prefix (text before the cursor)
//! - Left/Right, Home/End, Ctrl-A/Ctrl-E to move the cursor
//! - Up/Down to highlight a suggestion, Tab to complete it
//! - Enter to commit the highlighted suggestion or the typed text
//! - Ctrl-C, Esc, or Ctrl-D on an empty line to cancel

pub mod input;
pub mod types;
pub mod ui;

pub use input::{CrosstermKeys, KeySource, LineEditor};
pub use types::{KeyAction, Outcome, Phase, PromptOptions, NO_OTHER_CANDIDATES};
pub use ui::prompt_for_workspace;
