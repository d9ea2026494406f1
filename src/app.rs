//! Application wiring and the top-level nav bar.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AppContext` bundles the session container, the four services and the
//! navigation seams. Pages take a clone; every clone shares the same
//! container and service instances.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::cell::Cell;
use std::rc::Rc;

use crate::net::api::{ApiClient, AuthApi, SessionApi, TeacherApi, UserApi};
use crate::routes::Route;
use crate::state::session::{SessionState, Subscription};
use crate::util::nav::{Navigator, Notifier};

#[derive(Clone)]
pub struct AppContext {
    pub session: SessionState,
    pub auth: Rc<dyn AuthApi>,
    pub sessions: Rc<dyn SessionApi>,
    pub teachers: Rc<dyn TeacherApi>,
    pub users: Rc<dyn UserApi>,
    pub navigator: Rc<dyn Navigator>,
    pub notifier: Rc<dyn Notifier>,
}

impl AppContext {
    /// Serve every service from one `ApiClient`, sharing its session.
    #[must_use]
    pub fn from_client(client: ApiClient, navigator: Rc<dyn Navigator>, notifier: Rc<dyn Notifier>) -> Self {
        let session = client.session().clone();
        let client = Rc::new(client);
        Self {
            session,
            auth: client.clone(),
            sessions: client.clone(),
            teachers: client.clone(),
            users: client,
            navigator,
            notifier,
        }
    }

    /// Id of the logged-in user, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<u64> {
        self.session.current_session().map(|info| info.user_id)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.session.current_session().is_some_and(|info| info.is_admin)
    }
}

// =============================================================================
// NAV BAR
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavLink {
    Sessions,
    Account,
    Logout,
    Login,
    Register,
}

impl NavLink {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Sessions => "Sessions",
            Self::Account => "Account",
            Self::Logout => "Logout",
            Self::Login => "Login",
            Self::Register => "Register",
        }
    }

    /// Route the link points at. `Logout` is an action, not a route.
    #[must_use]
    pub fn route(self) -> Option<Route> {
        match self {
            Self::Sessions => Some(Route::Sessions),
            Self::Account => Some(Route::Me),
            Self::Login => Some(Route::Login),
            Self::Register => Some(Route::Register),
            Self::Logout => None,
        }
    }
}

/// Header links that follow the logged-in flag.
pub struct NavBar {
    session: SessionState,
    navigator: Rc<dyn Navigator>,
    logged_in: Rc<Cell<bool>>,
    _subscription: Subscription,
}

impl NavBar {
    #[must_use]
    pub fn new(ctx: &AppContext) -> Self {
        let logged_in = Rc::new(Cell::new(false));
        let flag = Rc::clone(&logged_in);
        let subscription = ctx.session.is_logged_in().subscribe(move |value| flag.set(value));
        Self {
            session: ctx.session.clone(),
            navigator: Rc::clone(&ctx.navigator),
            logged_in,
            _subscription: subscription,
        }
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.logged_in.get()
    }

    #[must_use]
    pub fn links(&self) -> &'static [NavLink] {
        if self.logged_in.get() {
            &[NavLink::Sessions, NavLink::Account, NavLink::Logout]
        } else {
            &[NavLink::Login, NavLink::Register]
        }
    }

    pub fn logout(&self) {
        self.session.log_out();
        self.navigator.navigate("/");
    }
}
