//! Account page: profile details and self-service deletion.

#[cfg(test)]
#[path = "me_test.rs"]
mod me_test;

use super::{PageError, confirm_and_navigate, require_user_id};
use crate::app::AppContext;
use crate::net::types::User;

pub const ACCOUNT_DELETED: &str = "Your account has been deleted !";
pub const ADMIN_NOTICE: &str = "You are admin";

pub struct MePage {
    ctx: AppContext,
    pub user: Option<User>,
}

impl MePage {
    #[must_use]
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx, user: None }
    }

    /// Fetch the logged-in account. A failure leaves `user` empty.
    ///
    /// # Errors
    ///
    /// `PageError::NotLoggedIn` when nobody is logged in, otherwise the
    /// service error.
    pub async fn load(&mut self) -> Result<(), PageError> {
        let user_id = require_user_id(&self.ctx)?;
        match self.ctx.users.get_by_id(user_id).await {
            Ok(user) => {
                self.user = Some(user);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(user_id, error = %e, "failed to load account");
                self.user = None;
                Err(e.into())
            }
        }
    }

    pub fn back(&self) {
        self.ctx.navigator.back();
    }

    /// Delete the account, log out and return home.
    ///
    /// # Errors
    ///
    /// `PageError::NotLoggedIn`, or the service error with the session
    /// left logged in.
    pub async fn delete(&mut self) -> Result<(), PageError> {
        let user_id = require_user_id(&self.ctx)?;
        self.ctx.users.delete(user_id).await?;
        tracing::info!(user_id, "account deleted");
        self.user = None;
        self.ctx.session.log_out();
        confirm_and_navigate(&self.ctx, ACCOUNT_DELETED, "/");
        Ok(())
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.admin)
    }

    /// Admins cannot delete themselves; they see [`ADMIN_NOTICE`] instead.
    #[must_use]
    pub fn can_delete_account(&self) -> bool {
        self.user.as_ref().is_some_and(|u| !u.admin)
    }

    #[must_use]
    pub fn admin_notice(&self) -> Option<&'static str> {
        self.is_admin().then_some(ADMIN_NOTICE)
    }
}
