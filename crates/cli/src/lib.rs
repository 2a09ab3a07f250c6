//! tfws CLI Library
//!
//! This crate provides the interactive side of tfws, a workspace selector
//! for tools such as `terraform`. It owns the terminal while a workspace is
//! being picked, offers live prefix suggestions, and then runs
//! `<tool> workspace select <name>`, falling back to
//! `<tool> workspace new <name>` when the select fails.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`terminal`]: Scoped raw mode with guaranteed restoration
//! - [`command_selection`]: The line prompt with live suggestions
//! - [`controller`]: The session state machine
//!
//! # Examples
//!
//! The CLI binary (`tfws`) can be used in several ways:
//!
//! ```bash
//! # Interactive mode, names are read from ./config.yaml
//! tfws
//!
//! # Select (or create) a workspace directly
//! tfws staging
//!
//! # Another tool, another candidate file
//! tfws --tool tofu --config-path ~/workspaces.yaml
//! ```

pub mod cli_args;
pub mod command_selection;
pub mod controller;
pub mod terminal;
