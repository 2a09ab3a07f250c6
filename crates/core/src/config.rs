//! Configuration path utilities for tfws.
//!
//! This module resolves the candidate configuration file path and holds the
//! defaults shared by the CLI.

/// Default path for the workspace configuration file, relative to the working directory
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Default external tool whose workspaces are being selected
pub const DEFAULT_TOOL: &str = "terraform";

/// Default number of suggestion rows drawn under the prompt
pub const DEFAULT_MAX_SUGGESTIONS: usize = 10;

/// Resolves the configuration file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// configuration path. Shell expansions like `~` are resolved.
///
/// # Arguments
///
/// * `config_path_arg` - Optional custom configuration file path
///
/// # Examples
///
/// ```
/// use tfws_core::config::get_config_path;
///
/// // Use default path
/// let default_path = get_config_path(&None);
/// assert_eq!(default_path, "config.yaml");
///
/// // Use custom path
/// let custom_path = get_config_path(&Some("/path/to/config.yaml".to_string()));
/// assert_eq!(custom_path, "/path/to/config.yaml");
/// ```
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = match config_path_arg {
        Some(config_path) => config_path,
        None => DEFAULT_CONFIG_PATH,
    };

    shellexpand::tilde(config_path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_path_with_custom_path() {
        let custom_path = Some("/custom/path/config.yaml".to_string());
        let result = get_config_path(&custom_path);
        assert_eq!(result, "/custom/path/config.yaml");
    }

    #[test]
    fn test_get_config_path_with_none() {
        let result = get_config_path(&None);
        assert_eq!(result, DEFAULT_CONFIG_PATH);
    }

    #[test]
    fn test_get_config_path_with_tilde() {
        let tilde_path = Some("~/workspaces.yaml".to_string());
        let result = get_config_path(&tilde_path);
        // Should expand the tilde
        assert!(!result.starts_with('~'));
        assert!(result.ends_with("workspaces.yaml"));
    }

    #[test]
    fn test_default_tool_constant() {
        assert_eq!(DEFAULT_TOOL, "terraform");
    }
}
