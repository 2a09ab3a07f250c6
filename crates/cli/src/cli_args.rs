//! Command-line argument parsing.
//!
//! This module defines the command-line interface of the `tfws` binary
//! using the `clap` crate.

use std::time::Duration;

use clap::Parser;
use tfws_core::config::{DEFAULT_MAX_SUGGESTIONS, DEFAULT_TOOL};
use tfws_core::suggestion::CaseSensitivity;

use crate::command_selection::PromptOptions;

/// Command-line arguments for the tfws CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use tfws_cli::cli_args::Args;
///
/// let args = Args::parse_from(["tfws", "--tool", "tofu", "staging"]);
/// assert_eq!(args.tool, "tofu");
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the YAML file whose top-level keys are the workspace names.
    ///
    /// If not provided, defaults to `config.yaml` in the working directory.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// External tool whose workspaces are selected.
    #[arg(long, short = 't', env = "TFWS_TOOL", default_value = DEFAULT_TOOL)]
    pub tool: String,

    /// Match suggestions regardless of case.
    #[arg(long, short = 'i', action)]
    pub ignore_case: bool,

    /// Stop a command that runs longer than this many seconds.
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Number of suggestions shown under the prompt.
    #[arg(long, default_value_t = DEFAULT_MAX_SUGGESTIONS)]
    pub max_suggestions: usize,

    /// Workspace to select directly, skipping the interactive prompt.
    #[arg(num_args(1))]
    pub workspace: Option<String>,
}

impl Args {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    pub fn prompt_options(&self) -> PromptOptions {
        PromptOptions {
            case: if self.ignore_case {
                CaseSensitivity::Insensitive
            } else {
                CaseSensitivity::Sensitive
            },
            max_suggestions: self.max_suggestions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_values() {
        let args = Args::parse_from(["tfws"]);

        assert!(args.config_path.is_none());
        assert!(!args.ignore_case);
        assert!(args.timeout().is_none());
        assert!(args.workspace.is_none());
        assert_eq!(args.max_suggestions, DEFAULT_MAX_SUGGESTIONS);
        assert_eq!(args.prompt_options(), PromptOptions::default());
    }

    #[test]
    fn test_args_all_options() {
        let args = Args::parse_from([
            "tfws",
            "-c",
            "/tmp/workspaces.yaml",
            "-t",
            "tofu",
            "-i",
            "--timeout",
            "30",
            "--max-suggestions",
            "5",
            "staging",
        ]);

        assert_eq!(args.config_path.as_deref(), Some("/tmp/workspaces.yaml"));
        assert_eq!(args.tool, "tofu");
        assert_eq!(args.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(args.workspace.as_deref(), Some("staging"));

        let options = args.prompt_options();
        assert_eq!(options.case, CaseSensitivity::Insensitive);
        assert_eq!(options.max_suggestions, 5);
    }

    #[test]
    fn test_args_zero_timeout_rejected() {
        assert!(Args::try_parse_from(["tfws", "--timeout", "0"]).is_err());
    }

    #[test]
    fn test_args_single_workspace_only() {
        assert!(Args::try_parse_from(["tfws", "staging", "prod"]).is_err());
    }
}
