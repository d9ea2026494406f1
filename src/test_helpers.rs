//! In-memory collaborators for controller tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::app::AppContext;
use crate::net::api::{ApiError, AuthApi, SessionApi, TeacherApi, UserApi};
use crate::net::types::{LoginRequest, RegisterRequest, Session, SessionInformation, Teacher, User};
use crate::state::session::SessionState;
use crate::util::nav::{Navigator, Notifier};

// =============================================================================
// FIXTURES
// =============================================================================

#[must_use]
pub fn session_info(user_id: u64, is_admin: bool) -> SessionInformation {
    SessionInformation {
        token: "t".to_owned(),
        token_type: "Bearer".to_owned(),
        user_id,
        username: "admin".to_owned(),
        first_name: "A".to_owned(),
        last_name: "B".to_owned(),
        is_admin,
    }
}

#[must_use]
pub fn yoga_session(id: u64, users: Vec<u64>) -> Session {
    Session {
        id: Some(id),
        name: "Yoga".to_owned(),
        date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        teacher_id: 10,
        description: "Desc".to_owned(),
        users,
        created_at: None,
        updated_at: None,
    }
}

#[must_use]
pub fn teacher(id: u64) -> Teacher {
    Teacher {
        id,
        first_name: "T".to_owned(),
        last_name: "Teacher".to_owned(),
        created_at: None,
        updated_at: None,
    }
}

#[must_use]
pub fn account(id: u64, admin: bool) -> User {
    User {
        id,
        email: "john@doe.com".to_owned(),
        first_name: "John".to_owned(),
        last_name: "Doe".to_owned(),
        admin,
        created_at: None,
        updated_at: None,
    }
}

// =============================================================================
// MOCK API
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Login(LoginRequest),
    Register(RegisterRequest),
    SessionsAll,
    SessionDetail(u64),
    SessionDelete(u64),
    SessionCreate(Session),
    SessionUpdate(u64, Session),
    Participate(u64, u64),
    UnParticipate(u64, u64),
    TeachersAll,
    TeacherDetail(u64),
    UserGet(u64),
    UserDelete(u64),
}

/// Backend double that records every call and keeps just enough state for
/// refetches to observe earlier writes.
#[derive(Default)]
pub struct MockApi {
    pub calls: RefCell<Vec<Call>>,
    /// Identity returned by `login`; `None` rejects with 401.
    pub login_response: RefCell<Option<SessionInformation>>,
    pub reject_register: Cell<bool>,
    pub sessions: RefCell<Vec<Session>>,
    pub teachers: RefCell<Vec<Teacher>>,
    pub user: RefCell<Option<User>>,
    /// Every call fails with 500 while set.
    pub fail: Cell<bool>,
}

fn status(status: u16, message: &str) -> ApiError {
    ApiError::Status { status, message: message.to_owned() }
}

impl MockApi {
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        if self.fail.get() {
            return Err(status(500, "Internal Server Error"));
        }
        Ok(())
    }

    fn find_session(&self, id: u64) -> Result<Session, ApiError> {
        self.sessions
            .borrow()
            .iter()
            .find(|s| s.id == Some(id))
            .cloned()
            .ok_or_else(|| status(404, "Not Found"))
    }

    fn with_session<F>(&self, id: u64, f: F) -> Result<(), ApiError>
    where
        F: FnOnce(&mut Session),
    {
        let mut sessions = self.sessions.borrow_mut();
        let session = sessions
            .iter_mut()
            .find(|s| s.id == Some(id))
            .ok_or_else(|| status(404, "Not Found"))?;
        f(session);
        Ok(())
    }
}

#[async_trait(?Send)]
impl AuthApi for MockApi {
    async fn login(&self, request: &LoginRequest) -> Result<SessionInformation, ApiError> {
        self.record(Call::Login(request.clone()))?;
        self.login_response
            .borrow()
            .clone()
            .ok_or_else(|| status(401, "Bad credentials"))
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.record(Call::Register(request.clone()))?;
        if self.reject_register.get() {
            return Err(status(400, "Error: Email is already taken!"));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl SessionApi for MockApi {
    async fn all(&self) -> Result<Vec<Session>, ApiError> {
        self.record(Call::SessionsAll)?;
        Ok(self.sessions.borrow().clone())
    }

    async fn detail(&self, id: u64) -> Result<Session, ApiError> {
        self.record(Call::SessionDetail(id))?;
        self.find_session(id)
    }

    async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.record(Call::SessionDelete(id))?;
        self.find_session(id)?;
        self.sessions.borrow_mut().retain(|s| s.id != Some(id));
        Ok(())
    }

    async fn create(&self, session: &Session) -> Result<Session, ApiError> {
        self.record(Call::SessionCreate(session.clone()))?;
        let mut sessions = self.sessions.borrow_mut();
        let next_id = sessions.iter().filter_map(|s| s.id).max().unwrap_or(0) + 1;
        let mut created = session.clone();
        created.id = Some(next_id);
        sessions.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: u64, session: &Session) -> Result<Session, ApiError> {
        self.record(Call::SessionUpdate(id, session.clone()))?;
        let mut updated = session.clone();
        updated.id = Some(id);
        let replacement = updated.clone();
        self.with_session(id, move |s| *s = replacement)?;
        Ok(updated)
    }

    async fn participate(&self, id: u64, user_id: u64) -> Result<(), ApiError> {
        self.record(Call::Participate(id, user_id))?;
        self.with_session(id, |s| {
            if !s.users.contains(&user_id) {
                s.users.push(user_id);
            }
        })
    }

    async fn un_participate(&self, id: u64, user_id: u64) -> Result<(), ApiError> {
        self.record(Call::UnParticipate(id, user_id))?;
        self.with_session(id, |s| s.users.retain(|u| *u != user_id))
    }
}

#[async_trait(?Send)]
impl TeacherApi for MockApi {
    async fn all(&self) -> Result<Vec<Teacher>, ApiError> {
        self.record(Call::TeachersAll)?;
        Ok(self.teachers.borrow().clone())
    }

    async fn detail(&self, id: u64) -> Result<Teacher, ApiError> {
        self.record(Call::TeacherDetail(id))?;
        self.teachers
            .borrow()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| status(404, "Not Found"))
    }
}

#[async_trait(?Send)]
impl UserApi for MockApi {
    async fn get_by_id(&self, id: u64) -> Result<User, ApiError> {
        self.record(Call::UserGet(id))?;
        self.user
            .borrow()
            .clone()
            .filter(|u| u.id == id)
            .ok_or_else(|| status(404, "Not Found"))
    }

    async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.record(Call::UserDelete(id))?;
        let mut user = self.user.borrow_mut();
        if user.as_ref().is_some_and(|u| u.id == id) {
            *user = None;
            return Ok(());
        }
        Err(status(404, "Not Found"))
    }
}

// =============================================================================
// MOCK NAVIGATION
// =============================================================================

/// Records navigation exactly as requested, without normalizing.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub navigations: RefCell<Vec<String>>,
    pub current: RefCell<String>,
    pub backs: Cell<usize>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn at(url: &str) -> Self {
        Self { current: RefCell::new(url.to_owned()), ..Self::default() }
    }

    #[must_use]
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.navigations.borrow_mut().push(path.to_owned());
        *self.current.borrow_mut() = path.to_owned();
    }

    fn back(&self) {
        self.backs.set(self.backs.get() + 1);
    }

    fn url(&self) -> String {
        self.current.borrow().clone()
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub opened: RefCell<Vec<(String, String, Duration)>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn opened(&self) -> Vec<(String, String, Duration)> {
        self.opened.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn open(&self, message: &str, action: &str, duration: Duration) {
        self.opened
            .borrow_mut()
            .push((message.to_owned(), action.to_owned(), duration));
    }
}

// =============================================================================
// HARNESS
// =============================================================================

/// Everything a page test needs, with handles kept for assertions.
pub struct Harness {
    pub api: Rc<MockApi>,
    pub navigator: Rc<RecordingNavigator>,
    pub notifier: Rc<RecordingNotifier>,
    pub session: SessionState,
}

impl Harness {
    #[must_use]
    pub fn new() -> Self {
        Self::at("/")
    }

    #[must_use]
    pub fn at(url: &str) -> Self {
        Self {
            api: Rc::new(MockApi::default()),
            navigator: Rc::new(RecordingNavigator::at(url)),
            notifier: Rc::new(RecordingNotifier::default()),
            session: SessionState::new(),
        }
    }

    /// Harness with `user_id` already logged in.
    #[must_use]
    pub fn logged_in(url: &str, user_id: u64, is_admin: bool) -> Self {
        let harness = Self::at(url);
        harness.session.log_in(session_info(user_id, is_admin));
        harness
    }

    #[must_use]
    pub fn ctx(&self) -> AppContext {
        AppContext {
            session: self.session.clone(),
            auth: self.api.clone(),
            sessions: self.api.clone(),
            teachers: self.api.clone(),
            users: self.api.clone(),
            navigator: self.navigator.clone(),
            notifier: self.notifier.clone(),
        }
    }
}
