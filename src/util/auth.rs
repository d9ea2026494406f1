//! Route guards.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route applies the same two redirect rules: members-only screens
//! bounce anonymous visitors to `login`, and the login/register screens
//! bounce members to `sessions`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::state::session::SessionState;
use crate::util::nav::Navigator;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    /// Requires a logged-in user.
    Auth,
    /// Requires nobody to be logged in.
    Unauth,
}

impl Guard {
    /// Where a refused visitor is sent.
    #[must_use]
    pub fn redirect_target(self) -> &'static str {
        match self {
            Self::Auth => "login",
            Self::Unauth => "sessions",
        }
    }

    #[must_use]
    pub fn allows(self, logged_in: bool) -> bool {
        match self {
            Self::Auth => logged_in,
            Self::Unauth => !logged_in,
        }
    }

    /// Check the guard, navigating to [`Guard::redirect_target`] on refusal.
    pub fn can_activate(self, session: &SessionState, navigator: &dyn Navigator) -> bool {
        if self.allows(session.logged_in()) {
            return true;
        }
        navigator.navigate(self.redirect_target());
        false
    }
}
