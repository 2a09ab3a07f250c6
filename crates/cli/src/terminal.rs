//! Scoped raw-mode control of the interactive terminal.
//!
//! [`ScopedTerminal::open`] snapshots the current terminal mode and switches
//! to raw mode. The snapshot is restored by [`ScopedTerminal::close`] or, if
//! that was never called, when the session is dropped. Restoration happens at
//! most once.

use std::io::{self, stdin};

use crossterm::terminal::{disable_raw_mode, enable_raw_mode, is_raw_mode_enabled};
use crossterm::tty::IsTty;
use log::{debug, warn};
use tfws_core::error::{Error, Result};

/// Snapshot of the terminal driver mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminalMode {
    Cooked,
    Raw,
}

/// Access to the terminal driver.
pub trait TerminalDriver {
    fn is_interactive(&self) -> bool;
    fn current_mode(&self) -> io::Result<TerminalMode>;
    fn set_mode(&mut self, mode: TerminalMode) -> io::Result<()>;
}

/// Driver for the process' own terminal.
#[derive(Debug, Default)]
pub struct CrosstermDriver;

impl TerminalDriver for CrosstermDriver {
    fn is_interactive(&self) -> bool {
        stdin().is_tty()
    }

    fn current_mode(&self) -> io::Result<TerminalMode> {
        if is_raw_mode_enabled()? {
            Ok(TerminalMode::Raw)
        } else {
            Ok(TerminalMode::Cooked)
        }
    }

    fn set_mode(&mut self, mode: TerminalMode) -> io::Result<()> {
        match mode {
            TerminalMode::Raw => enable_raw_mode(),
            TerminalMode::Cooked => disable_raw_mode(),
        }
    }
}

pub struct ScopedTerminal<D: TerminalDriver> {
    driver: D,
    snapshot: Option<TerminalMode>,
}

impl<D: TerminalDriver> ScopedTerminal<D> {
    /// Captures the current mode and switches the terminal to raw mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TerminalUnavailable`] if stdin is not a terminal, or
    /// the mode cannot be read or changed. When changing the mode fails the
    /// captured mode is restored before returning.
    pub fn open(driver: D) -> Result<Self> {
        if !driver.is_interactive() {
            return Err(Error::terminal_unavailable(
                "standard input is not a terminal",
            ));
        }

        let snapshot = driver
            .current_mode()
            .map_err(|e| Error::terminal_unavailable(e))?;

        let mut session = Self {
            driver,
            snapshot: Some(snapshot),
        };

        if let Err(e) = session.driver.set_mode(TerminalMode::Raw) {
            if let Err(restore_error) = session.close() {
                warn!("Unable to restore terminal mode: {restore_error}");
            }
            return Err(Error::terminal_unavailable(e));
        }

        debug!("Terminal switched to raw mode, previous mode was {snapshot:?}");
        Ok(session)
    }

    /// Whether a snapshot is still waiting to be restored.
    pub fn is_open(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Restores the mode captured by [`ScopedTerminal::open`]. Calling this
    /// again has no effect.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal driver rejects the mode change.
    pub fn close(&mut self) -> Result<()> {
        if let Some(snapshot) = self.snapshot.take() {
            self.driver.set_mode(snapshot)?;
            debug!("Terminal mode restored to {snapshot:?}");
        }

        Ok(())
    }
}

impl<D: TerminalDriver> Drop for ScopedTerminal<D> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Unable to restore terminal mode: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Clone)]
    struct FakeDriver {
        mode: Rc<Cell<TerminalMode>>,
        mode_changes: Rc<RefCell<Vec<TerminalMode>>>,
        interactive: bool,
        fail_raw: bool,
    }

    impl FakeDriver {
        fn new(mode: TerminalMode) -> Self {
            Self {
                mode: Rc::new(Cell::new(mode)),
                mode_changes: Rc::new(RefCell::new(Vec::new())),
                interactive: true,
                fail_raw: false,
            }
        }
    }

    impl TerminalDriver for FakeDriver {
        fn is_interactive(&self) -> bool {
            self.interactive
        }

        fn current_mode(&self) -> io::Result<TerminalMode> {
            Ok(self.mode.get())
        }

        fn set_mode(&mut self, mode: TerminalMode) -> io::Result<()> {
            if self.fail_raw && mode == TerminalMode::Raw {
                return Err(io::Error::other("tcsetattr failed"));
            }
            self.mode_changes.borrow_mut().push(mode);
            self.mode.set(mode);
            Ok(())
        }
    }

    #[test]
    fn test_open_switches_to_raw_and_close_restores() {
        let driver = FakeDriver::new(TerminalMode::Cooked);
        let mode = Rc::clone(&driver.mode);

        let mut session = ScopedTerminal::open(driver).unwrap();
        assert_eq!(mode.get(), TerminalMode::Raw);
        assert!(session.is_open());

        session.close().unwrap();
        assert_eq!(mode.get(), TerminalMode::Cooked);
        assert!(!session.is_open());
    }

    #[test]
    fn test_close_is_idempotent() {
        let driver = FakeDriver::new(TerminalMode::Cooked);
        let changes = Rc::clone(&driver.mode_changes);

        let mut session = ScopedTerminal::open(driver).unwrap();
        session.close().unwrap();
        session.close().unwrap();
        drop(session);

        assert_eq!(
            *changes.borrow(),
            vec![TerminalMode::Raw, TerminalMode::Cooked]
        );
    }

    #[test]
    fn test_drop_restores_mode() {
        let driver = FakeDriver::new(TerminalMode::Cooked);
        let mode = Rc::clone(&driver.mode);

        {
            let _session = ScopedTerminal::open(driver).unwrap();
            assert_eq!(mode.get(), TerminalMode::Raw);
        }

        assert_eq!(mode.get(), TerminalMode::Cooked);
    }

    #[test]
    fn test_restores_raw_snapshot() {
        let driver = FakeDriver::new(TerminalMode::Raw);
        let mode = Rc::clone(&driver.mode);

        let mut session = ScopedTerminal::open(driver).unwrap();
        session.close().unwrap();

        assert_eq!(mode.get(), TerminalMode::Raw);
    }

    #[test]
    fn test_open_not_interactive() {
        let mut driver = FakeDriver::new(TerminalMode::Cooked);
        driver.interactive = false;
        let changes = Rc::clone(&driver.mode_changes);

        let result = ScopedTerminal::open(driver);
        assert!(matches!(result, Err(Error::TerminalUnavailable(_))));
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn test_open_failure_restores_snapshot() {
        let mut driver = FakeDriver::new(TerminalMode::Cooked);
        driver.fail_raw = true;
        let mode = Rc::clone(&driver.mode);
        let changes = Rc::clone(&driver.mode_changes);

        let result = ScopedTerminal::open(driver);
        assert!(matches!(result, Err(Error::TerminalUnavailable(_))));
        assert_eq!(mode.get(), TerminalMode::Cooked);
        assert_eq!(*changes.borrow(), vec![TerminalMode::Cooked]);
    }
}
