//! Type definitions for workspace selection.
//!
//! This module defines the controller phases, the result of a selection
//! session, and the options of the interactive prompt.

use std::io::Write;

use tfws_core::config::DEFAULT_MAX_SUGGESTIONS;
use tfws_core::execution::CommandResult;
use tfws_core::suggestion::CaseSensitivity;

/// Message reported when there is nothing to choose between.
pub const NO_OTHER_CANDIDATES: &str = "No other candidates found";

/// Exit code for a final command attempt that failed.
pub const EXIT_COMMAND_FAILED: u8 = 2;

/// Phases of a selection session.
///
/// `Aborted` is reachable from every phase when an unrecoverable error
/// occurs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingInput,
    Selected,
    ExecutingPrimary,
    ExecutingFallback,
    Done,
    Aborted,
}

/// What a completed session did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// There was at most one candidate, so nothing was run.
    NoOtherCandidates,
    /// The primary command ran, followed by the fallback if the primary failed.
    Executed {
        workspace: String,
        primary: CommandResult,
        fallback: Option<CommandResult>,
    },
}

impl Outcome {
    /// The result of the last command that ran.
    pub fn final_result(&self) -> Option<&CommandResult> {
        match self {
            Outcome::NoOtherCandidates => None,
            Outcome::Executed {
                primary, fallback, ..
            } => Some(fallback.as_ref().unwrap_or(primary)),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.final_result().map_or(true, |result| result.success)
    }

    pub fn exit_code(&self) -> u8 {
        if self.succeeded() {
            0
        } else {
            EXIT_COMMAND_FAILED
        }
    }

    /// Writes captured command output verbatim: stdout to `out`, stderr to
    /// `err`. The stderr of a failed primary attempt is kept when the
    /// fallback ran.
    pub fn report<O: Write, E: Write>(&self, out: &mut O, err: &mut E) -> std::io::Result<()> {
        match self {
            Outcome::NoOtherCandidates => writeln!(out, "{NO_OTHER_CANDIDATES}")?,
            Outcome::Executed {
                primary, fallback, ..
            } => match fallback {
                None => write_result(primary, out, err)?,
                Some(fallback) => {
                    write_timeout(primary, err)?;
                    err.write_all(primary.stderr.as_bytes())?;
                    write_result(fallback, out, err)?;
                }
            },
        }

        out.flush()?;
        err.flush()
    }
}

fn write_timeout<E: Write>(result: &CommandResult, err: &mut E) -> std::io::Result<()> {
    if result.timed_out {
        writeln!(err, "Command timed out and was stopped.")?;
    }
    Ok(())
}

fn write_result<O: Write, E: Write>(
    result: &CommandResult,
    out: &mut O,
    err: &mut E,
) -> std::io::Result<()> {
    write_timeout(result, err)?;
    err.write_all(result.stderr.as_bytes())?;
    out.write_all(result.stdout.as_bytes())
}

/// Options of the interactive prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptOptions {
    /// Prefix matching policy for suggestions
    pub case: CaseSensitivity,
    /// Rows of suggestions drawn under the prompt
    pub max_suggestions: usize,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            case: CaseSensitivity::default(),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

/// What a key press asks the prompt to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Bell,
    Commit(String),
    Cancel,
}
