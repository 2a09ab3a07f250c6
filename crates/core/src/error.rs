use leon::{ParseError, RenderError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unable to read {} file at `{}`: {}", .file_description, .path, .original)]
    ConfigUnreadable {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error parsing {} file at `{}`: {}", .file_description, .path, .original)]
    ConfigMalformed {
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("No interactive terminal available: {}", .0)]
    TerminalUnavailable(String),

    #[error("Unable to launch `{}`: {}", .program, .original)]
    LaunchFailed {
        program: String,
        original: std::io::Error,
    },

    #[error("Command line is empty, there is no program to run.")]
    EmptyInvocation,

    #[error("Interrupted before a workspace was selected.")]
    Interrupted,

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),

    #[error("Error parsing command template: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error rendering command template: {}", .0)]
    Render(#[from] RenderError),
}

impl Error {
    pub fn config_unreadable(
        file_description: String,
        path: String,
        original: std::io::Error,
    ) -> Self {
        Self::ConfigUnreadable {
            file_description,
            path,
            original,
        }
    }

    pub fn config_malformed(
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::ConfigMalformed {
            file_description,
            path,
            original,
        }
    }

    pub fn launch_failed(program: String, original: std::io::Error) -> Self {
        Self::LaunchFailed { program, original }
    }

    pub fn terminal_unavailable(reason: impl ToString) -> Self {
        Self::TerminalUnavailable(reason.to_string())
    }
}
