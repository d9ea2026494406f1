//! Account creation.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use super::PageError;
use crate::app::AppContext;
use crate::net::types::RegisterRequest;
use crate::util::form::{self, FormError};

const NAME_MIN: usize = 3;
const NAME_MAX: usize = 20;
const PASSWORD_MIN: usize = 3;
const PASSWORD_MAX: usize = 40;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl RegisterForm {
    /// # Errors
    ///
    /// Returns the first failing field rule, checked in form order.
    pub fn validate(&self) -> Result<RegisterRequest, FormError> {
        let email = form::email("email", &self.email)?;
        let first_name = form::required("firstName", &self.first_name)?;
        form::length("firstName", first_name, NAME_MIN, Some(NAME_MAX))?;
        let last_name = form::required("lastName", &self.last_name)?;
        form::length("lastName", last_name, NAME_MIN, Some(NAME_MAX))?;
        let password = form::required("password", &self.password)?;
        form::length("password", password, PASSWORD_MIN, Some(PASSWORD_MAX))?;
        Ok(RegisterRequest {
            email,
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            password: password.to_owned(),
        })
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

pub struct RegisterPage {
    ctx: AppContext,
    pub form: RegisterForm,
    pub on_error: bool,
}

impl RegisterPage {
    #[must_use]
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx, form: RegisterForm::default(), on_error: false }
    }

    /// Create the account and continue to the login screen.
    ///
    /// # Errors
    ///
    /// `PageError::Form` for an invalid form; `PageError::Api` with
    /// `on_error` set when the backend refuses.
    pub async fn submit(&mut self) -> Result<(), PageError> {
        let request = self.form.validate()?;
        match self.ctx.auth.register(&request).await {
            Ok(()) => {
                self.on_error = false;
                self.ctx.navigator.navigate("/login");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "registration rejected");
                self.on_error = true;
                Err(e.into())
            }
        }
    }
}
