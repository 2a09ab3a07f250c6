use std::collections::HashMap;

use leon::Template;

use crate::error::Result;

/// Placeholder for the external tool name in a command template.
pub const TOOL_KEY: &str = "tool";
/// Placeholder for the selected workspace name in a command template.
pub const WORKSPACE_KEY: &str = "workspace";

pub fn build_context(tool: &str, workspace: &str) -> HashMap<String, String> {
    HashMap::from([
        (TOOL_KEY.to_string(), tool.to_string()),
        (WORKSPACE_KEY.to_string(), workspace.to_string()),
    ])
}

pub fn get_templates(command: &[String]) -> Result<Vec<Template<'_>>> {
    let mut templates: Vec<Template> = Vec::new();

    for argument in command {
        templates.push(Template::parse(argument.as_ref())?);
    }

    Ok(templates)
}

pub fn interpolate_command(
    context: &HashMap<String, String>,
    templates: &[Template],
) -> Result<Vec<String>> {
    let mut interpolated_arguments: Vec<String> = Vec::new();

    for template in templates {
        interpolated_arguments.push(template.render(context)?);
    }

    Ok(interpolated_arguments)
}
