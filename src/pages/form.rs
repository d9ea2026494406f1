//! Admin form for creating and updating sessions.
//!
//! DESIGN
//! ======
//! The same page serves `/sessions/create` and `/sessions/update/{id}`; it
//! is in update mode iff the current url contains `update`. Updates keep
//! the participant list of the loaded session so editing never drops
//! attendees.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use super::{PageError, confirm_and_navigate};
use crate::app::AppContext;
use crate::net::types::{Session, Teacher};
use crate::routes::Route;
use crate::util::form::{self, FormError};

pub const SESSION_CREATED: &str = "Session created !";
pub const SESSION_UPDATED: &str = "Session updated !";

const DESCRIPTION_MAX: usize = 2000;
const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Raw form fields as typed. `date` uses the `YYYY-MM-DD` input format.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionForm {
    pub name: String,
    pub date: String,
    pub teacher_id: Option<u64>,
    pub description: String,
}

impl SessionForm {
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        Self {
            name: session.name.clone(),
            date: session.date.format(DATE_INPUT_FORMAT).to_string(),
            teacher_id: Some(session.teacher_id),
            description: session.description.clone(),
        }
    }

    /// Build a session body with no id and no participants.
    ///
    /// # Errors
    ///
    /// Returns the first failing field rule.
    pub fn validate(&self) -> Result<Session, FormError> {
        let name = form::required("name", &self.name)?;
        let date = form::date("date", &self.date)?;
        let teacher_id = self.teacher_id.ok_or(FormError::Required { field: "teacher_id" })?;
        let description = form::required("description", &self.description)?;
        form::length("description", description, 0, Some(DESCRIPTION_MAX))?;
        Ok(Session {
            id: None,
            name: name.to_owned(),
            date,
            teacher_id,
            description: description.to_owned(),
            users: Vec::new(),
            created_at: None,
            updated_at: None,
        })
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

pub struct FormPage {
    ctx: AppContext,
    pub form: SessionForm,
    pub on_update: bool,
    pub teachers: Vec<Teacher>,
    session_id: Option<u64>,
    users: Vec<u64>,
}

impl FormPage {
    #[must_use]
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            form: SessionForm::default(),
            on_update: false,
            teachers: Vec::new(),
            session_id: None,
            users: Vec::new(),
        }
    }

    /// Redirect non-admins, otherwise prepare the form for the current url.
    ///
    /// # Errors
    ///
    /// `PageError::MissingParam` for an update url without a numeric id,
    /// or the failing service call.
    pub async fn init(&mut self) -> Result<(), PageError> {
        if !self.ctx.is_admin() {
            tracing::debug!("non-admin sent away from session form");
            self.ctx.navigator.navigate("/sessions");
            return Ok(());
        }

        let url = self.ctx.navigator.url();
        self.on_update = url.contains("update");
        if self.on_update {
            let Route::SessionUpdate(id) = Route::parse(&url) else {
                return Err(PageError::MissingParam("id"));
            };
            let session = self.ctx.sessions.detail(id).await?;
            self.form = SessionForm::from_session(&session);
            self.session_id = Some(id);
            self.users = session.users;
        } else {
            self.form = SessionForm::default();
            self.session_id = None;
            self.users.clear();
        }

        self.teachers = self.ctx.teachers.all().await?;
        Ok(())
    }

    /// Picker entries as `(teacher id, display name)`.
    #[must_use]
    pub fn teacher_options(&self) -> Vec<(u64, String)> {
        self.teachers.iter().map(|t| (t.id, t.display_name())).collect()
    }

    /// # Errors
    ///
    /// `PageError::Form` without any request for an invalid form, or the
    /// service error with no snackbar and no navigation.
    pub async fn submit(&mut self) -> Result<(), PageError> {
        let mut session = self.form.validate()?;
        if self.on_update {
            let id = self.session_id.ok_or(PageError::MissingParam("id"))?;
            session.users.clone_from(&self.users);
            self.ctx.sessions.update(id, &session).await?;
            tracing::info!(session_id = id, "session updated");
            confirm_and_navigate(&self.ctx, SESSION_UPDATED, "sessions");
        } else {
            let created = self.ctx.sessions.create(&session).await?;
            tracing::info!(session_id = ?created.id, "session created");
            confirm_and_navigate(&self.ctx, SESSION_CREATED, "sessions");
        }
        Ok(())
    }
}
