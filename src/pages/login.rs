//! Email + password login.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use super::PageError;
use crate::app::AppContext;
use crate::net::types::LoginRequest;
use crate::util::form::{self, FormError};

const PASSWORD_MIN: usize = 3;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns the first failing field rule.
    pub fn validate(&self) -> Result<LoginRequest, FormError> {
        let email = form::email("email", &self.email)?;
        let password = form::required("password", &self.password)?;
        form::length("password", password, PASSWORD_MIN, None)?;
        Ok(LoginRequest { email, password: password.to_owned() })
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

pub struct LoginPage {
    ctx: AppContext,
    pub form: LoginForm,
    /// Set after the backend rejects a submit; cleared by the next success.
    pub on_error: bool,
    pub hide_password: bool,
}

impl LoginPage {
    #[must_use]
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx, form: LoginForm::default(), on_error: false, hide_password: true }
    }

    pub fn toggle_password_visibility(&mut self) {
        self.hide_password = !self.hide_password;
    }

    /// Exchange the credentials for an identity and enter the app.
    ///
    /// # Errors
    ///
    /// `PageError::Form` without any request when the form is invalid;
    /// `PageError::Api` when the backend rejects, with `on_error` set and
    /// the session container untouched.
    pub async fn submit(&mut self) -> Result<(), PageError> {
        let request = self.form.validate()?;
        match self.ctx.auth.login(&request).await {
            Ok(info) => {
                self.on_error = false;
                self.ctx.session.log_in(info);
                self.ctx.navigator.navigate("/sessions");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "login rejected");
                self.on_error = true;
                Err(e.into())
            }
        }
    }
}
