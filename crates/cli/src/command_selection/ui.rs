use std::io::Write;

use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::queue;
use crossterm::style::Color::{DarkBlue, DarkGrey, Reset, Yellow};
use crossterm::style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use log::{debug, warn};
use tfws_core::error::{Error, Result};
use tfws_core::suggestion::suggest_with;

use super::input::{KeySource, LineEditor};
use super::types::{KeyAction, PromptOptions};

/// Prompt drawn in front of the input line
pub const PROMPT: &str = "> ";

/// Title printed above the prompt
pub const HEADER: &str = "Workspaces";

/// Draws the input line and the suggestion rows below it, then puts the
/// cursor back on the input line. Raw mode needs explicit `\r\n`.
pub fn redraw_prompt<W: Write>(
    out: &mut W,
    editor: &LineEditor,
    suggestions: &[&str],
    max_rows: usize,
) -> Result<()> {
    queue!(
        out,
        MoveToColumn(0),
        Clear(ClearType::FromCursorDown),
        Print(PROMPT),
        Print(editor.text())
    )?;

    let mut rows: u16 = 0;
    for (i, suggestion) in suggestions.iter().take(max_rows).enumerate() {
        queue!(out, Print("\r\n"))?;

        if editor.highlighted() == Some(i) {
            queue!(
                out,
                SetAttribute(Attribute::Bold),
                SetBackgroundColor(DarkBlue),
                SetForegroundColor(Yellow),
            )?;
        }

        queue!(
            out,
            Print(format!("  {suggestion}")),
            SetAttribute(Attribute::Reset),
            SetBackgroundColor(Reset),
            SetForegroundColor(Reset),
        )?;
        rows += 1;
    }

    if suggestions.len() > max_rows {
        queue!(
            out,
            Print("\r\n"),
            SetForegroundColor(DarkGrey),
            Print(format!("  … {} more", suggestions.len() - max_rows)),
            SetForegroundColor(Reset),
        )?;
        rows += 1;
    }

    if rows > 0 {
        queue!(out, MoveUp(rows))?;
    }

    let column = PROMPT.chars().count() + editor.prefix().chars().count();
    queue!(out, MoveToColumn(u16::try_from(column).unwrap_or(u16::MAX)))?;

    out.flush()?;
    Ok(())
}

/// Clears the suggestion rows and leaves the committed value on its own line.
fn finish_prompt<W: Write>(out: &mut W, committed: Option<&str>) -> Result<()> {
    queue!(out, MoveToColumn(0), Clear(ClearType::FromCursorDown))?;

    if let Some(committed) = committed {
        queue!(out, Print(PROMPT), Print(committed))?;
    }

    queue!(out, Print("\r\n"))?;
    out.flush()?;
    Ok(())
}

/// Reads a workspace name with live prefix suggestions.
///
/// The terminal is expected to be in raw mode. Suggestions are recomputed
/// after every key press from the text before the cursor.
///
/// # Errors
///
/// Returns [`Error::Interrupted`] when the user cancels, or any error of
/// the key source or the output.
pub fn prompt_for_workspace<K: KeySource, W: Write>(
    candidates: &[String],
    options: &PromptOptions,
    keys: &mut K,
    out: &mut W,
) -> Result<String> {
    let mut editor = LineEditor::default();

    queue!(out, Print(HEADER), Print("\r\n"))?;

    let mut suggestions = suggest_with(candidates, editor.prefix(), options.case);
    redraw_prompt(out, &editor, &suggestions, options.max_suggestions)?;

    loop {
        let key_event = match keys.next_key() {
            Ok(Some(key_event)) => key_event,
            Ok(None) => continue,
            Err(e) => {
                // Leave the line clean, the error is what gets reported
                if let Err(finish_error) = finish_prompt(out, None) {
                    warn!("Unable to clear the prompt: {finish_error}");
                }
                return Err(e);
            }
        };

        let visible = suggestions.len().min(options.max_suggestions);
        match editor.handle_key(key_event, &suggestions[..visible]) {
            KeyAction::Continue => {}
            KeyAction::Bell => {
                queue!(out, Print("\x07"))?;
            }
            KeyAction::Commit(value) => {
                finish_prompt(out, Some(&value))?;
                debug!("Committed `{value}`");
                return Ok(value);
            }
            KeyAction::Cancel => {
                finish_prompt(out, None)?;
                return Err(Error::Interrupted);
            }
        }

        suggestions = suggest_with(candidates, editor.prefix(), options.case);
        redraw_prompt(out, &editor, &suggestions, options.max_suggestions)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::collections::VecDeque;

    struct Keys(VecDeque<Option<KeyEvent>>);

    impl KeySource for Keys {
        fn next_key(&mut self) -> Result<Option<KeyEvent>> {
            self.0.pop_front().ok_or(Error::Interrupted)
        }
    }

    fn keys(codes: &[KeyCode]) -> Keys {
        Keys(
            codes
                .iter()
                .map(|code| Some(KeyEvent::new(*code, KeyModifiers::NONE)))
                .collect(),
        )
    }

    fn candidates() -> Vec<String> {
        vec!["default".to_string(), "staging".to_string(), "prod".to_string()]
    }

    #[test]
    fn test_redraw_prompt_lists_suggestions() {
        let mut out = Vec::new();
        let editor = LineEditor::default();

        redraw_prompt(&mut out, &editor, &["default", "staging"], 10).unwrap();

        let drawn = String::from_utf8(out).unwrap();
        assert!(drawn.contains(PROMPT));
        assert!(drawn.contains("  default"));
        assert!(drawn.contains("  staging"));
        assert!(!drawn.contains("more"));
    }

    #[test]
    fn test_redraw_prompt_truncates_rows() {
        let mut out = Vec::new();
        let editor = LineEditor::default();

        redraw_prompt(&mut out, &editor, &["a", "b", "c"], 2).unwrap();

        let drawn = String::from_utf8(out).unwrap();
        assert!(drawn.contains("  b"));
        assert!(!drawn.contains("  c"));
        assert!(drawn.contains("1 more"));
    }

    #[test]
    fn test_prompt_commits_completed_suggestion() {
        let candidates = candidates();
        let mut keys = keys(&[
            KeyCode::Char('s'),
            KeyCode::Char('t'),
            KeyCode::Tab,
            KeyCode::Enter,
        ]);
        let mut out = Vec::new();

        let value =
            prompt_for_workspace(&candidates, &PromptOptions::default(), &mut keys, &mut out)
                .unwrap();

        assert_eq!(value, "staging");
        let drawn = String::from_utf8(out).unwrap();
        assert!(drawn.starts_with(HEADER));
    }

    #[test]
    fn test_prompt_highlight_stays_on_drawn_rows() {
        let candidates: Vec<String> = ["a", "b", "c", "d"].iter().map(ToString::to_string).collect();
        let options = PromptOptions {
            max_suggestions: 2,
            ..PromptOptions::default()
        };
        let mut keys = keys(&[KeyCode::Down, KeyCode::Down, KeyCode::Down, KeyCode::Enter]);
        let mut out = Vec::new();

        let value = prompt_for_workspace(&candidates, &options, &mut keys, &mut out).unwrap();

        assert_eq!(value, "a");
        let drawn = String::from_utf8(out).unwrap();
        assert!(!drawn.contains("  c"));
        assert!(drawn.contains("2 more"));
    }

    #[test]
    fn test_prompt_skips_empty_polls() {
        let candidates = candidates();
        let mut keys = Keys(VecDeque::from(vec![
            None,
            Some(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)),
            None,
            Some(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
        ]));
        let mut out = Vec::new();

        let value =
            prompt_for_workspace(&candidates, &PromptOptions::default(), &mut keys, &mut out)
                .unwrap();
        assert_eq!(value, "x");
    }

    #[test]
    fn test_prompt_cancel() {
        let candidates = candidates();
        let mut keys = keys(&[KeyCode::Char('p'), KeyCode::Esc]);
        let mut out = Vec::new();

        let result =
            prompt_for_workspace(&candidates, &PromptOptions::default(), &mut keys, &mut out);
        assert!(matches!(result, Err(Error::Interrupted)));
    }

    #[test]
    fn test_prompt_exhausted_input() {
        let candidates = candidates();
        let mut keys = keys(&[KeyCode::Char('p')]);
        let mut out = Vec::new();

        let result =
            prompt_for_workspace(&candidates, &PromptOptions::default(), &mut keys, &mut out);
        assert!(matches!(result, Err(Error::Interrupted)));
    }
}
