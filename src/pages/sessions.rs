//! Session list.

#[cfg(test)]
#[path = "sessions_test.rs"]
mod sessions_test;

use super::PageError;
use crate::app::AppContext;
use crate::net::types::{Session, SessionInformation};
use crate::routes::Route;

pub struct ListPage {
    ctx: AppContext,
    pub sessions: Vec<Session>,
}

impl ListPage {
    #[must_use]
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx, sessions: Vec::new() }
    }

    /// # Errors
    ///
    /// Returns the service error; the previous list is kept.
    pub async fn load(&mut self) -> Result<(), PageError> {
        let sessions = self.ctx.sessions.all().await.inspect_err(|e| {
            tracing::warn!(error = %e, "failed to load sessions");
        })?;
        self.sessions = sessions;
        Ok(())
    }

    #[must_use]
    pub fn user(&self) -> Option<SessionInformation> {
        self.ctx.session.current_session()
    }

    /// Create and edit actions are admin-only.
    #[must_use]
    pub fn can_manage(&self) -> bool {
        self.ctx.is_admin()
    }

    /// Link targets for one card: detail always, update for admins.
    #[must_use]
    pub fn actions(&self, session: &Session) -> Vec<Route> {
        let Some(id) = session.id else {
            return Vec::new();
        };
        let mut routes = vec![Route::SessionDetail(id)];
        if self.can_manage() {
            routes.push(Route::SessionUpdate(id));
        }
        routes
    }
}
