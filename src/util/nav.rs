//! Navigation and notification seams used by page controllers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages never touch a concrete router or toast widget. They call
//! `Navigator`/`Notifier` so the same controller drives the CLI, tests and
//! any future rendering layer.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use std::cell::RefCell;
use std::time::Duration;

/// How long confirmation snackbars stay open.
pub const SNACKBAR_DURATION: Duration = Duration::from_secs(3);
/// Action label shown on every snackbar.
pub const SNACKBAR_ACTION: &str = "Close";

pub trait Navigator {
    /// Go to `path`. Relative (`"sessions"`) and absolute (`"/sessions"`)
    /// forms are both accepted.
    fn navigate(&self, path: &str);
    /// Return to the previous history entry, if any.
    fn back(&self);
    /// Absolute path of the current location.
    fn url(&self) -> String;
}

pub trait Notifier {
    fn open(&self, message: &str, action: &str, duration: Duration);
}

/// `"sessions"` -> `"/sessions"`, `""` -> `"/"`.
#[must_use]
pub fn absolute_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    format!("/{trimmed}")
}

// =============================================================================
// IN-MEMORY ROUTER
// =============================================================================

/// History stack kept in memory. Starts at `/`.
#[derive(Debug)]
pub struct MemoryRouter {
    history: RefCell<Vec<String>>,
}

impl Default for MemoryRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at("/")
    }

    #[must_use]
    pub fn starting_at(path: &str) -> Self {
        Self { history: RefCell::new(vec![absolute_path(path)]) }
    }

    /// Every visited path, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }
}

impl Navigator for MemoryRouter {
    fn navigate(&self, path: &str) {
        let path = absolute_path(path);
        tracing::debug!(%path, "navigate");
        self.history.borrow_mut().push(path);
    }

    fn back(&self) {
        let mut history = self.history.borrow_mut();
        if history.len() > 1 {
            history.pop();
        }
    }

    fn url(&self) -> String {
        self.history.borrow().last().cloned().unwrap_or_else(|| "/".to_owned())
    }
}

// =============================================================================
// NOTIFIERS
// =============================================================================

/// Emits snackbar messages as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn open(&self, message: &str, action: &str, duration: Duration) {
        tracing::info!(%message, %action, duration_ms = duration.as_millis(), "snackbar");
    }
}
