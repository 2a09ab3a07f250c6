use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use signal_hook::SigId;
use tfws_core::error::{Error, Result};

use super::types::KeyAction;

/// Source of key presses for the prompt.
pub trait KeySource {
    /// Returns the next key press, or `None` if nothing arrived in time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interrupted`] once the session should stop reading.
    fn next_key(&mut self) -> Result<Option<KeyEvent>>;

    /// Called once the prompt is over. Nothing is read afterwards.
    fn release(&mut self) {}
}

/// Key presses read from the terminal with crossterm.
///
/// The `interrupted` flag is checked before every poll, so a signal handler
/// setting it ends the prompt within one poll interval.
pub struct CrosstermKeys {
    poll_interval: Duration,
    interrupted: Arc<AtomicBool>,
    signal_ids: Vec<SigId>,
}

impl CrosstermKeys {
    pub fn new(interrupted: Arc<AtomicBool>) -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            interrupted,
            signal_ids: Vec::new(),
        }
    }

    /// Routes SIGINT, SIGTERM and SIGHUP into the interrupt flag until
    /// [`KeySource::release`] is called, so a signal during the prompt ends
    /// it through the normal terminal restore path. Once released the
    /// signals get their default action back.
    ///
    /// # Errors
    ///
    /// Returns an error if a signal handler cannot be registered.
    pub fn with_signals() -> Result<Self> {
        let mut keys = Self::new(Arc::new(AtomicBool::new(false)));

        #[cfg(unix)]
        {
            for signal in [
                signal_hook::consts::SIGINT,
                signal_hook::consts::SIGTERM,
                signal_hook::consts::SIGHUP,
            ] {
                let id = signal_hook::flag::register(signal, Arc::clone(&keys.interrupted))?;
                keys.signal_ids.push(id);
            }
        }

        Ok(keys)
    }
}

impl KeySource for CrosstermKeys {
    fn next_key(&mut self) -> Result<Option<KeyEvent>> {
        if self.interrupted.load(Ordering::Relaxed) {
            return Err(Error::Interrupted);
        }

        if !event::poll(self.poll_interval)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key_event) if key_event.kind != KeyEventKind::Release => Ok(Some(key_event)),
            _ => Ok(None),
        }
    }

    fn release(&mut self) {
        if self.signal_ids.is_empty() {
            return;
        }
        for id in self.signal_ids.drain(..) {
            signal_hook::low_level::unregister(id);
        }
        debug!("Signal handlers released");
    }
}

impl Drop for CrosstermKeys {
    fn drop(&mut self) {
        self.release();
    }
}

/// Single line input buffer with a cursor and a highlighted suggestion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineEditor {
    buffer: String,
    /// Cursor position in characters
    cursor: usize,
    highlighted: Option<usize>,
}

impl LineEditor {
    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// The text before the cursor, which suggestions are matched against.
    pub fn prefix(&self) -> &str {
        &self.buffer[..self.byte_offset(self.cursor)]
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map_or(self.buffer.len(), |(offset, _)| offset)
    }

    fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    fn insert(&mut self, c: char) {
        let offset = self.byte_offset(self.cursor);
        self.buffer.insert(offset, c);
        self.cursor += 1;
        self.highlighted = None;
    }

    fn remove_at(&mut self, char_index: usize) {
        let offset = self.byte_offset(char_index);
        self.buffer.remove(offset);
        self.highlighted = None;
    }

    fn move_cursor(&mut self, char_index: usize) {
        self.cursor = char_index.min(self.char_count());
        self.highlighted = None;
    }

    fn replace(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.char_count();
        self.highlighted = None;
    }

    fn cycle(&mut self, forward: bool, suggestion_count: usize) {
        self.highlighted = Some(match (self.highlighted, forward) {
            (None, true) => 0,
            (None, false) => suggestion_count - 1,
            (Some(i), true) => (i + 1) % suggestion_count,
            (Some(0), false) => suggestion_count - 1,
            (Some(i), false) => i - 1,
        });
    }

    /// Applies a key press given the suggestions currently on screen.
    pub fn handle_key(&mut self, key_event: KeyEvent, suggestions: &[&str]) -> KeyAction {
        let control = key_event.modifiers.contains(KeyModifiers::CONTROL);

        match key_event.code {
            KeyCode::Char('c') if control => KeyAction::Cancel,
            KeyCode::Char('d') if control => {
                if self.buffer.is_empty() {
                    return KeyAction::Cancel;
                }
                if self.cursor < self.char_count() {
                    self.remove_at(self.cursor);
                }
                KeyAction::Continue
            }
            KeyCode::Char('a') if control => {
                self.move_cursor(0);
                KeyAction::Continue
            }
            KeyCode::Char('e') if control => {
                self.move_cursor(self.char_count());
                KeyAction::Continue
            }
            KeyCode::Char('u') if control => {
                let offset = self.byte_offset(self.cursor);
                self.buffer.drain(..offset);
                self.cursor = 0;
                self.highlighted = None;
                KeyAction::Continue
            }
            KeyCode::Char(_) if control => KeyAction::Continue,
            KeyCode::Char(c) => {
                self.insert(c);
                KeyAction::Continue
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return KeyAction::Bell;
                }
                self.cursor -= 1;
                self.remove_at(self.cursor);
                KeyAction::Continue
            }
            KeyCode::Delete => {
                if self.cursor >= self.char_count() {
                    return KeyAction::Bell;
                }
                self.remove_at(self.cursor);
                KeyAction::Continue
            }
            KeyCode::Left => {
                self.move_cursor(self.cursor.saturating_sub(1));
                KeyAction::Continue
            }
            KeyCode::Right => {
                self.move_cursor(self.cursor + 1);
                KeyAction::Continue
            }
            KeyCode::Home => {
                self.move_cursor(0);
                KeyAction::Continue
            }
            KeyCode::End => {
                self.move_cursor(self.char_count());
                KeyAction::Continue
            }
            KeyCode::Tab => {
                let index = self.highlighted.unwrap_or(0);
                match suggestions.get(index) {
                    Some(suggestion) => {
                        self.replace(suggestion);
                        KeyAction::Continue
                    }
                    None => KeyAction::Bell,
                }
            }
            KeyCode::Down | KeyCode::Up | KeyCode::BackTab => {
                if suggestions.is_empty() {
                    return KeyAction::Bell;
                }
                self.cycle(key_event.code == KeyCode::Down, suggestions.len());
                KeyAction::Continue
            }
            KeyCode::Enter => {
                let value = self
                    .highlighted
                    .and_then(|i| suggestions.get(i).copied())
                    .unwrap_or_else(|| self.buffer.trim());

                if value.is_empty() {
                    KeyAction::Bell
                } else {
                    KeyAction::Commit(value.to_string())
                }
            }
            KeyCode::Esc => KeyAction::Cancel,
            _ => KeyAction::Continue,
        }
    }
}
