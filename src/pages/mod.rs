//! Page controllers for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its form/view state and orchestrates services, the
//! session container and navigation through an `AppContext`. Rendering is
//! left to whatever front end drives the controller.
//!
//! ERROR HANDLING
//! ==============
//! Operations return `PageError`. Validation failures never reach the
//! network; service failures leave local state as it was before the call
//! unless the page documents an error flag.

pub mod detail;
pub mod form;
pub mod login;
pub mod me;
pub mod register;
pub mod sessions;

use crate::app::AppContext;
use crate::net::api::ApiError;
use crate::util::form::FormError;
use crate::util::nav::{SNACKBAR_ACTION, SNACKBAR_DURATION};

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid form: {0}")]
    Form(#[from] FormError),
    #[error("no user is logged in")]
    NotLoggedIn,
    #[error("missing route parameter: {0}")]
    MissingParam(&'static str),
}

fn require_user_id(ctx: &AppContext) -> Result<u64, PageError> {
    ctx.user_id().ok_or(PageError::NotLoggedIn)
}

/// Show a confirmation snackbar, then leave for `path`.
fn confirm_and_navigate(ctx: &AppContext, message: &str, path: &str) {
    ctx.notifier.open(message, SNACKBAR_ACTION, SNACKBAR_DURATION);
    ctx.navigator.navigate(path);
}
