//! Orchestration of a selection session.
//!
//! The controller opens the terminal, reads a workspace name, then runs the
//! primary command and, only if that fails, the fallback command once.

use std::io::Write;

use log::{debug, info, warn};
use tfws_core::command_definitions::{Invocation, WorkspaceCommands};
use tfws_core::error::{Error, Result};
use tfws_core::execution::{CommandResult, CommandRunner};

use crate::command_selection::{prompt_for_workspace, KeySource, Outcome, Phase, PromptOptions};
use crate::terminal::{ScopedTerminal, TerminalDriver};

pub struct SelectionController<'a> {
    candidates: &'a [String],
    commands: &'a WorkspaceCommands,
    options: PromptOptions,
    transitions: Vec<Phase>,
}

impl<'a> SelectionController<'a> {
    pub fn new(
        candidates: &'a [String],
        commands: &'a WorkspaceCommands,
        options: PromptOptions,
    ) -> Self {
        Self {
            candidates,
            commands,
            options,
            transitions: vec![Phase::Idle],
        }
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.transitions.last().copied().unwrap_or(Phase::Idle)
    }

    /// Every phase entered so far, starting with [`Phase::Idle`].
    pub fn transitions(&self) -> &[Phase] {
        &self.transitions
    }

    fn enter(&mut self, phase: Phase) {
        debug!("{:?} -> {:?}", self.phase(), phase);
        self.transitions.push(phase);
    }

    fn has_other_candidates(&self) -> bool {
        self.candidates.len() > 1
    }

    /// Runs an interactive session: prompt, then primary and fallback commands.
    ///
    /// The terminal is in raw mode only while the prompt is shown. It is
    /// restored before any command runs and on every error path.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal is unavailable, the user cancels, or
    /// writing to the terminal fails. The controller ends in
    /// [`Phase::Aborted`] in that case.
    pub fn run<D, K, R, W>(
        &mut self,
        driver: D,
        keys: &mut K,
        runner: &mut R,
        out: &mut W,
    ) -> Result<Outcome>
    where
        D: TerminalDriver,
        K: KeySource,
        R: CommandRunner,
        W: Write,
    {
        let result = self.run_interactive(driver, keys, runner, out);
        self.finish(result)
    }

    /// Runs a session for an already chosen workspace, without a prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if a command template cannot be rendered.
    pub fn run_with_workspace<R: CommandRunner>(
        &mut self,
        workspace: &str,
        runner: &mut R,
    ) -> Result<Outcome> {
        let result = if self.has_other_candidates() {
            self.execute(workspace, runner)
        } else {
            Ok(Outcome::NoOtherCandidates)
        };
        self.finish(result)
    }

    fn run_interactive<D, K, R, W>(
        &mut self,
        driver: D,
        keys: &mut K,
        runner: &mut R,
        out: &mut W,
    ) -> Result<Outcome>
    where
        D: TerminalDriver,
        K: KeySource,
        R: CommandRunner,
        W: Write,
    {
        if !self.has_other_candidates() {
            info!("{} candidate(s), nothing to select", self.candidates.len());
            return Ok(Outcome::NoOtherCandidates);
        }

        let mut terminal = ScopedTerminal::open(driver)?;
        self.enter(Phase::AwaitingInput);

        let prompt = prompt_for_workspace(self.candidates, &self.options, keys, out);
        keys.release();
        let workspace = prompt?;
        terminal.close()?;

        self.execute(&workspace, runner)
    }

    fn execute<R: CommandRunner>(&mut self, workspace: &str, runner: &mut R) -> Result<Outcome> {
        self.enter(Phase::Selected);
        info!("Selected workspace `{workspace}`");

        let primary_invocation = self.commands.primary(workspace)?;
        let fallback_invocation = self.commands.fallback(workspace)?;

        self.enter(Phase::ExecutingPrimary);
        let primary = attempt(runner, &primary_invocation)?;
        if primary.success {
            return Ok(Outcome::Executed {
                workspace: workspace.to_string(),
                primary,
                fallback: None,
            });
        }

        info!("`{primary_invocation}` failed, falling back to `{fallback_invocation}`");
        self.enter(Phase::ExecutingFallback);
        let fallback = attempt(runner, &fallback_invocation)?;

        Ok(Outcome::Executed {
            workspace: workspace.to_string(),
            primary,
            fallback: Some(fallback),
        })
    }

    fn finish(&mut self, result: Result<Outcome>) -> Result<Outcome> {
        match &result {
            Ok(_) => self.enter(Phase::Done),
            Err(e) => {
                warn!("Session aborted: {e}");
                self.enter(Phase::Aborted);
            }
        }
        result
    }
}

/// Runs one command. A program that cannot be started counts as a failed
/// command, with the launch error as its stderr.
fn attempt<R: CommandRunner>(runner: &mut R, invocation: &Invocation) -> Result<CommandResult> {
    match runner.run(invocation) {
        Err(error @ Error::LaunchFailed { .. }) => {
            warn!("{error}");
            Ok(CommandResult::launch_failure(&error))
        }
        result => result,
    }
}
