//! Client-side route table.
//!
//! ARCHITECTURE
//! ============
//! `Route::parse` maps a path onto a screen, `Route::guard` names the access
//! rule for it, and `activate` applies that rule against the current
//! `SessionState`, redirecting through the `Navigator` when refused.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::state::session::SessionState;
use crate::util::auth::Guard;
use crate::util::nav::Navigator;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Sessions,
    SessionDetail(u64),
    SessionCreate,
    SessionUpdate(u64),
    Me,
    NotFound,
}

impl Route {
    /// Resolve a path. Query strings and fragments are ignored.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Self::Home,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["sessions"] => Self::Sessions,
            ["sessions", "create"] => Self::SessionCreate,
            ["sessions", "detail", id] => id.parse().map_or(Self::NotFound, Self::SessionDetail),
            ["sessions", "update", id] => id.parse().map_or(Self::NotFound, Self::SessionUpdate),
            ["me"] => Self::Me,
            _ => Self::NotFound,
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::Login => "/login".to_owned(),
            Self::Register => "/register".to_owned(),
            Self::Sessions => "/sessions".to_owned(),
            Self::SessionDetail(id) => format!("/sessions/detail/{id}"),
            Self::SessionCreate => "/sessions/create".to_owned(),
            Self::SessionUpdate(id) => format!("/sessions/update/{id}"),
            Self::Me => "/me".to_owned(),
            Self::NotFound => "/404".to_owned(),
        }
    }

    /// Access rule protecting this route.
    #[must_use]
    pub fn guard(&self) -> Option<Guard> {
        match self {
            Self::Home | Self::Login | Self::Register => Some(Guard::Unauth),
            Self::Sessions | Self::SessionDetail(_) | Self::SessionCreate | Self::SessionUpdate(_) | Self::Me => {
                Some(Guard::Auth)
            }
            Self::NotFound => None,
        }
    }
}

/// Navigate to `path` if its guard allows it.
///
/// Returns the activated route, or `None` when the guard refused and
/// redirected elsewhere.
pub fn activate(path: &str, session: &SessionState, navigator: &dyn Navigator) -> Option<Route> {
    let route = Route::parse(path);
    if let Some(guard) = route.guard() {
        if !guard.can_activate(session, navigator) {
            tracing::debug!(%path, ?guard, "route refused");
            return None;
        }
    }
    navigator.navigate(&route.path());
    Some(route)
}
