//! tfws Core Library
//!
//! This crate provides the non-interactive pieces of tfws, an interactive
//! workspace selector for tools such as `terraform`: loading candidate
//! workspace names, prefix suggestions, command templates and execution of
//! external commands with captured output.
//!
//! # Key Features
//!
//! - **Candidate Loading**: Read workspace names from the keys of a YAML mapping
//! - **Suggestions**: Stable prefix filtering for live autocomplete
//! - **Command Templates**: Typed argument vectors with `{tool}` and `{workspace}` placeholders
//! - **Execution**: Run a command, capture stdout/stderr, optionally with a timeout
//! - **Error Handling**: One error type for every failure mode
//!
//! # Examples
//!
//! Loading candidates and filtering them by prefix:
//!
//! ```no_run
//! use tfws_core::file_handling::load_candidates;
//! use tfws_core::suggestion::suggest;
//!
//! let candidates = load_candidates("config.yaml")?;
//! for name in suggest(&candidates, "st") {
//!     println!("{name}");
//! }
//! # Ok::<(), tfws_core::error::Error>(())
//! ```

pub mod command_definitions;
pub mod config;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod interpolation;
pub mod suggestion;
