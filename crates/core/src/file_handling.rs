//! Loading of candidate workspace names from the configuration file.
//!
//! The configuration file is a flat YAML mapping. Its keys are the
//! candidate names; the values belong to other tooling and are ignored here.

use std::fs;

use indexmap::IndexMap;
use log::{debug, warn};

use crate::error::{Error, Result};

const FILE_DESCRIPTION: &str = "workspace configuration";

fn read_config(file_description: &str, path: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::config_unreadable(file_description.to_string(), path.to_string(), e))
}

/// Parses candidate names out of YAML content.
///
/// Keys keep their document order. Repeated keys collapse into one entry and
/// empty keys are skipped.
///
/// # Errors
///
/// Returns [`Error::ConfigMalformed`] if the content is not a mapping with
/// string keys.
pub fn parse_candidates(content: &str, path: &str) -> Result<Vec<String>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let parsed: Option<IndexMap<String, serde_yaml::Value>> = serde_yaml::from_str(content)
        .map_err(|e| Error::config_malformed(FILE_DESCRIPTION.to_string(), path.to_string(), e))?;

    let Some(parsed) = parsed else {
        return Ok(Vec::new());
    };

    Ok(parsed
        .into_keys()
        .filter(|name| {
            if name.is_empty() {
                warn!("Skipping empty workspace name in `{path}`");
                return false;
            }
            true
        })
        .collect())
}

/// Loads the candidate workspace names from a configuration file.
///
/// # Arguments
///
/// * `config_path` - Path to the YAML configuration file
///
/// # Returns
///
/// The candidate names, in the order they appear in the file
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or read ([`Error::ConfigUnreadable`])
/// - The file is not a YAML mapping with string keys ([`Error::ConfigMalformed`])
pub fn load_candidates(config_path: &str) -> Result<Vec<String>> {
    let content = read_config(FILE_DESCRIPTION, config_path)?;
    let candidates = parse_candidates(&content, config_path)?;
    debug!(
        "Loaded {} candidate(s) from `{}`",
        candidates.len(),
        config_path
    );
    Ok(candidates)
}
