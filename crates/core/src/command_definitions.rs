use std::fmt::{Display, Formatter};

use crate::error::{Error, Result};
use crate::interpolation::{build_context, get_templates, interpolate_command};

/// A program and its argument vector, ready to be spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds an invocation whose first argument is the program.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInvocation`] if there are no arguments or the
    /// program is empty.
    pub fn from_arguments(arguments: Vec<String>) -> Result<Self> {
        let mut arguments = arguments.into_iter();
        match arguments.next() {
            Some(program) if !program.is_empty() => Ok(Self {
                program,
                args: arguments.collect(),
            }),
            _ => Err(Error::EmptyInvocation),
        }
    }

    /// Splits a command line on whitespace. There is no quoting: `a "b c"`
    /// yields the arguments `"b` and `c"`.
    pub fn from_command_line(command_line: &str) -> Result<Self> {
        Self::from_arguments(
            command_line
                .split_whitespace()
                .map(ToString::to_string)
                .collect(),
        )
    }
}

impl Display for Invocation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.program)?;
        for arg in &self.args {
            write!(formatter, " {arg}")?;
        }
        Ok(())
    }
}

/// An argument vector whose entries may reference `{tool}` and `{workspace}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    pub command: Vec<String>,
}

impl CommandTemplate {
    pub fn new(command: &[&str]) -> Self {
        Self {
            command: command.iter().map(ToString::to_string).collect(),
        }
    }

    /// Renders the template for one tool and workspace.
    ///
    /// # Errors
    ///
    /// Returns an error if a template argument cannot be parsed, references
    /// an unknown placeholder, or the program renders empty.
    pub fn render(&self, tool: &str, workspace: &str) -> Result<Invocation> {
        let templates = get_templates(&self.command)?;
        let arguments = interpolate_command(&build_context(tool, workspace), &templates)?;
        Invocation::from_arguments(arguments)
    }
}

impl Display for CommandTemplate {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.command.join(" ").as_str())
    }
}

/// The primary ("select existing") and fallback ("create new") commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceCommands {
    pub tool: String,
    pub select: CommandTemplate,
    pub create: CommandTemplate,
}

impl WorkspaceCommands {
    /// Default `<tool> workspace select|new <workspace>` commands.
    pub fn for_tool(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            select: CommandTemplate::new(&["{tool}", "workspace", "select", "{workspace}"]),
            create: CommandTemplate::new(&["{tool}", "workspace", "new", "{workspace}"]),
        }
    }

    pub fn primary(&self, workspace: &str) -> Result<Invocation> {
        self.select.render(&self.tool, workspace)
    }

    pub fn fallback(&self, workspace: &str) -> Result<Invocation> {
        self.create.render(&self.tool, workspace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_command_line_splits_on_whitespace() {
        let invocation = Invocation::from_command_line("  terraform workspace\tselect  prod ").unwrap();
        assert_eq!(invocation.program, "terraform");
        assert_eq!(invocation.args, vec!["workspace", "select", "prod"]);
    }

    #[test]
    fn test_from_command_line_does_not_honour_quotes() {
        let invocation = Invocation::from_command_line("echo \"a b\"").unwrap();
        assert_eq!(invocation.args, vec!["\"a", "b\""]);
    }

    #[test]
    fn test_from_command_line_empty() {
        assert!(matches!(
            Invocation::from_command_line("   "),
            Err(Error::EmptyInvocation)
        ));
    }

    #[test]
    fn test_invocation_display() {
        let invocation = Invocation::new("terraform", ["workspace", "new", "dev"]);
        assert_eq!(invocation.to_string(), "terraform workspace new dev");
    }

    #[test]
    fn test_workspace_commands_default_templates() {
        let commands = WorkspaceCommands::for_tool("terraform");

        assert_eq!(
            commands.primary("staging").unwrap(),
            Invocation::new("terraform", ["workspace", "select", "staging"])
        );
        assert_eq!(
            commands.fallback("staging").unwrap(),
            Invocation::new("terraform", ["workspace", "new", "staging"])
        );
    }

    #[test]
    fn test_workspace_commands_custom_tool() {
        let commands = WorkspaceCommands::for_tool("tofu");
        assert_eq!(commands.primary("dev").unwrap().program, "tofu");
    }

    #[test]
    fn test_render_empty_program() {
        let commands = WorkspaceCommands::for_tool("");
        assert!(matches!(
            commands.primary("dev"),
            Err(Error::EmptyInvocation)
        ));
    }
}
