//! Prefix filtering of candidate names for live autocomplete.

/// How a prefix is compared against candidate names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CaseSensitivity {
    #[default]
    Sensitive,
    Insensitive,
}

fn has_prefix(candidate: &str, prefix: &str, case: CaseSensitivity) -> bool {
    match case {
        CaseSensitivity::Sensitive => candidate.starts_with(prefix),
        CaseSensitivity::Insensitive => {
            let mut candidate_chars = candidate.chars().flat_map(char::to_lowercase);
            prefix
                .chars()
                .flat_map(char::to_lowercase)
                .all(|p| candidate_chars.next() == Some(p))
        }
    }
}

/// Returns the candidates that start with `prefix`, case-sensitively.
///
/// This is a stable filter: the relative order of `candidates` is kept and
/// nothing is truncated. An empty prefix matches every candidate.
///
/// # Examples
///
/// ```
/// use tfws_core::suggestion::suggest;
///
/// let candidates = vec!["default".to_string(), "staging".to_string(), "prod".to_string()];
/// assert_eq!(suggest(&candidates, "st"), vec!["staging"]);
/// assert_eq!(suggest(&candidates, "").len(), 3);
/// ```
pub fn suggest<'a>(candidates: &'a [String], prefix: &str) -> Vec<&'a str> {
    suggest_with(candidates, prefix, CaseSensitivity::Sensitive)
}

/// Same as [`suggest`] with an explicit case policy.
pub fn suggest_with<'a>(
    candidates: &'a [String],
    prefix: &str,
    case: CaseSensitivity,
) -> Vec<&'a str> {
    candidates
        .iter()
        .map(String::as_str)
        .filter(|candidate| has_prefix(candidate, prefix, case))
        .collect()
}
