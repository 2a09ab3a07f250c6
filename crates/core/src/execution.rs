use std::io::{self, Read};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, info, warn};
use wait_timeout::ChildExt;

use crate::command_definitions::Invocation;
use crate::error::{Error, Result};

/// Captured outcome of one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub timed_out: bool,
}

impl CommandResult {
    /// A failed result describing a command that could not be started.
    pub fn launch_failure(error: &Error) -> Self {
        Self {
            stderr: format!("{error}\n"),
            ..Self::default()
        }
    }
}

/// Runs invocations on behalf of the selection controller.
pub trait CommandRunner {
    /// # Errors
    ///
    /// Returns [`Error::LaunchFailed`] if the program cannot be started. A
    /// non-zero exit is reported through [`CommandResult::success`].
    fn run(&mut self, invocation: &Invocation) -> Result<CommandResult>;
}

/// Runs invocations as child processes.
#[derive(Debug, Default, Clone)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<CommandResult> {
        execute_command(invocation, self.timeout)
    }
}

/// Executes an invocation, capturing stdout and stderr in memory.
///
/// Both pipes are drained on reader threads while the child runs, so output
/// larger than the OS pipe buffer never stalls it. With a timeout, a child
/// still running when it expires is killed and the result is marked as
/// failed and timed out.
///
/// # Errors
///
/// Returns an error if the program cannot be started, or waiting on the
/// child or reading its output fails.
pub fn execute_command(invocation: &Invocation, timeout: Option<Duration>) -> Result<CommandResult> {
    info!("Executing `{invocation}`");

    let mut child = Command::new(&invocation.program)
        .args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::launch_failed(invocation.program.clone(), e))?;

    let stdout_reader = drain(child.stdout.take());
    let stderr_reader = drain(child.stderr.take());

    let mut timed_out = false;
    let status = match timeout {
        Some(timeout) => match child.wait_timeout(timeout)? {
            Some(status) => status,
            None => {
                warn!("`{invocation}` did not finish within {timeout:?}, killing it");
                child.kill()?;
                timed_out = true;
                child.wait()?
            }
        },
        None => child.wait()?,
    };
    debug!("`{invocation}` exited with {status}");

    let stdout = collect(stdout_reader)?;
    let stderr = collect(stderr_reader)?;

    Ok(CommandResult {
        stdout: String::from_utf8_lossy(&stdout).to_string(),
        stderr: String::from_utf8_lossy(&stderr).to_string(),
        success: status.success() && !timed_out,
        timed_out,
    })
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buffer)?;
        }
        Ok(buffer)
    })
}

fn collect(reader: JoinHandle<io::Result<Vec<u8>>>) -> Result<Vec<u8>> {
    let buffer = reader
        .join()
        .map_err(|_| io::Error::other("output reader thread panicked"))??;
    Ok(buffer)
}

/// Runs a whitespace separated command line with no timeout.
///
/// # Errors
///
/// Returns [`Error::EmptyInvocation`] for a blank line and
/// [`Error::LaunchFailed`] if the program cannot be started.
pub fn run(command_line: &str) -> Result<CommandResult> {
    execute_command(&Invocation::from_command_line(command_line)?, None)
}
