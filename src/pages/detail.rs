//! Session detail: teacher, participants, and participation toggling.
//!
//! DESIGN
//! ======
//! Identity (`is_admin`, `user_id`) is captured from the session container
//! when the page is built. Every participation change is followed by a full
//! refetch so `is_participate` always reflects the backend.

#[cfg(test)]
#[path = "detail_test.rs"]
mod detail_test;

use super::{PageError, confirm_and_navigate};
use crate::app::AppContext;
use crate::net::types::{Session, Teacher};

pub const SESSION_DELETED: &str = "Session deleted !";

pub struct DetailPage {
    ctx: AppContext,
    pub session_id: u64,
    pub is_admin: bool,
    pub user_id: Option<u64>,
    pub session: Option<Session>,
    pub teacher: Option<Teacher>,
    pub is_participate: bool,
}

impl DetailPage {
    #[must_use]
    pub fn new(ctx: AppContext, session_id: u64) -> Self {
        let current = ctx.session.current_session();
        Self {
            session_id,
            is_admin: current.as_ref().is_some_and(|info| info.is_admin),
            user_id: current.map(|info| info.user_id),
            ctx,
            session: None,
            teacher: None,
            is_participate: false,
        }
    }

    /// # Errors
    ///
    /// Returns the first failing service call.
    pub async fn init(&mut self) -> Result<(), PageError> {
        self.fetch_session().await
    }

    pub fn back(&self) {
        self.ctx.navigator.back();
    }

    /// # Errors
    ///
    /// Returns the service error without navigating.
    pub async fn delete(&mut self) -> Result<(), PageError> {
        self.ctx.sessions.delete(self.session_id).await?;
        tracing::info!(session_id = self.session_id, "session deleted");
        confirm_and_navigate(&self.ctx, SESSION_DELETED, "sessions");
        Ok(())
    }

    /// # Errors
    ///
    /// `PageError::NotLoggedIn` when the page was built anonymously.
    pub async fn participate(&mut self) -> Result<(), PageError> {
        let user_id = self.user_id.ok_or(PageError::NotLoggedIn)?;
        self.ctx.sessions.participate(self.session_id, user_id).await?;
        self.fetch_session().await
    }

    /// # Errors
    ///
    /// `PageError::NotLoggedIn` when the page was built anonymously.
    pub async fn un_participate(&mut self) -> Result<(), PageError> {
        let user_id = self.user_id.ok_or(PageError::NotLoggedIn)?;
        self.ctx.sessions.un_participate(self.session_id, user_id).await?;
        self.fetch_session().await
    }

    #[must_use]
    pub fn attendee_count(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.users.len())
    }

    async fn fetch_session(&mut self) -> Result<(), PageError> {
        let session = self.ctx.sessions.detail(self.session_id).await?;
        self.is_participate = self.user_id.is_some_and(|id| session.has_participant(id));
        let teacher_id = session.teacher_id;
        self.session = Some(session);
        self.teacher = Some(self.ctx.teachers.detail(teacher_id).await?);
        Ok(())
    }
}
