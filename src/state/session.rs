//! Logged-in user state shared by every page, guard and service.
//!
//! SYSTEM CONTEXT
//! ==============
//! The login page pushes identity in, the nav bar and route guards observe
//! it, and `ApiClient` reads the bearer token from it on every request.
//!
//! DESIGN
//! ======
//! A single-threaded reactive cell: the snapshot lives behind
//! `Rc<RefCell<_>>`, the logged-in flag is derived from it at mutation time,
//! and an observer registry replays the current flag to each new subscriber
//! before forwarding later changes.
//!
//! Mutations are queued and drained outside any `RefCell` borrow, so a
//! subscriber may read the state or even log in/out from inside its callback.
//! A mutation raised mid-round is delivered after the round finishes, which
//! keeps every subscriber on the same global order. Each subscriber tracks
//! the last version it saw so a replay is never followed by a duplicate of
//! the same mutation.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::task::{Context, Poll};

use futures::StreamExt;
use futures::channel::mpsc;
use futures::stream::Stream;

use crate::net::types::SessionInformation;

// =============================================================================
// STATE CONTAINER
// =============================================================================

/// Handle to the current-user cell. Clones share the same cell.
#[derive(Clone, Default)]
pub struct SessionState {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Default)]
struct Inner {
    session: Option<SessionInformation>,
    /// Bumped once per mutation.
    version: u64,
    next_subscriber_id: u64,
    subscribers: Vec<Rc<Subscriber>>,
    pending: VecDeque<Emission>,
    notifying: bool,
}

#[derive(Clone, Copy, Debug)]
struct Emission {
    version: u64,
    logged_in: bool,
}

struct Subscriber {
    id: u64,
    seen: Cell<u64>,
    active: Cell<bool>,
    callback: RefCell<Box<dyn FnMut(bool)>>,
}

impl Subscriber {
    fn deliver(&self, emission: Emission) {
        if !self.active.get() || self.seen.get() >= emission.version {
            return;
        }
        self.seen.set(emission.version);
        (self.callback.borrow_mut())(emission.logged_in);
    }
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `info` as the current user and notify subscribers with `true`.
    pub fn log_in(&self, info: SessionInformation) {
        tracing::info!(user_id = info.user_id, admin = info.is_admin, "user logged in");
        self.replace(Some(info));
    }

    /// Forget the current user and notify subscribers with `false`.
    ///
    /// Emits even when nobody was logged in.
    pub fn log_out(&self) {
        tracing::info!("user logged out");
        self.replace(None);
    }

    /// Lazy observable of the logged-in flag.
    #[must_use]
    pub fn is_logged_in(&self) -> LoggedIn {
        LoggedIn { state: self.clone() }
    }

    /// Current value of the logged-in flag.
    #[must_use]
    pub fn logged_in(&self) -> bool {
        self.inner.borrow().session.is_some()
    }

    /// Owned copy of the current user, if any.
    #[must_use]
    pub fn current_session(&self) -> Option<SessionInformation> {
        self.inner.borrow().session.clone()
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|s| s.active.get())
            .count()
    }

    fn replace(&self, session: Option<SessionInformation>) {
        {
            let mut inner = self.inner.borrow_mut();
            let logged_in = session.is_some();
            inner.session = session;
            inner.version += 1;
            let version = inner.version;
            inner.pending.push_back(Emission { version, logged_in });
            if inner.notifying {
                return;
            }
            inner.notifying = true;
        }
        self.drain();
    }

    /// Deliver queued emissions until the queue is empty. Callers must have
    /// set `notifying` before entering.
    fn drain(&self) {
        let _round = RoundGuard(&self.inner);
        loop {
            let (emission, subscribers) = {
                let mut inner = self.inner.borrow_mut();
                inner.subscribers.retain(|s| s.active.get());
                let Some(emission) = inner.pending.pop_front() else {
                    return;
                };
                (emission, inner.subscribers.clone())
            };
            for subscriber in subscribers {
                subscriber.deliver(emission);
            }
        }
    }

    fn subscribe_boxed(&self, callback: Box<dyn FnMut(bool)>) -> Subscription {
        let (subscriber, replay, was_notifying) = {
            let mut inner = self.inner.borrow_mut();
            inner.next_subscriber_id += 1;
            let subscriber = Rc::new(Subscriber {
                id: inner.next_subscriber_id,
                seen: Cell::new(inner.version),
                active: Cell::new(true),
                callback: RefCell::new(callback),
            });
            inner.subscribers.push(Rc::clone(&subscriber));
            let was_notifying = inner.notifying;
            inner.notifying = true;
            (subscriber, inner.session.is_some(), was_notifying)
        };
        tracing::debug!(subscriber = subscriber.id, replay, "logged-in subscriber attached");

        // Built first so a panicking replay still unregisters the callback.
        let subscription = Subscription { state: Rc::downgrade(&self.inner), subscriber };
        if was_notifying {
            (subscription.subscriber.callback.borrow_mut())(replay);
        } else {
            let _round = RoundGuard(&self.inner);
            (subscription.subscriber.callback.borrow_mut())(replay);
            self.drain();
        }
        subscription
    }
}

/// Ends a notification round on drop, unwinding included, so a panicking
/// callback cannot leave later mutations queued forever.
struct RoundGuard<'a>(&'a RefCell<Inner>);

impl Drop for RoundGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.0.try_borrow_mut() {
            inner.notifying = false;
        }
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SessionState")
            .field("session", &inner.session)
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

// =============================================================================
// OBSERVABLE
// =============================================================================

/// The logged-in flag as an observable. Nothing is registered until
/// [`LoggedIn::subscribe`] or [`LoggedIn::stream`] is called, and either may
/// be called any number of times.
#[derive(Clone, Debug)]
pub struct LoggedIn {
    state: SessionState,
}

impl LoggedIn {
    /// Register `callback`. It is invoked immediately with the current flag,
    /// then once per later `log_in`/`log_out`, until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(bool) + 'static,
    {
        self.state.subscribe_boxed(Box::new(callback))
    }

    /// Adapt the observable into an endless async stream.
    #[must_use]
    pub fn stream(&self) -> LoggedInStream {
        let (sender, receiver) = mpsc::unbounded();
        let subscription = self.subscribe(move |logged_in| {
            let _ = sender.unbounded_send(logged_in);
        });
        LoggedInStream { receiver, _subscription: subscription }
    }
}

/// Registration handle; dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes it"]
pub struct Subscription {
    state: Weak<RefCell<Inner>>,
    subscriber: Rc<Subscriber>,
}

impl Subscription {
    /// Stop receiving notifications.
    pub fn unsubscribe(self) {}

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.subscriber.active.get()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.subscriber.active.set(false);
        let Some(state) = self.state.upgrade() else {
            return;
        };
        // A busy cell means we are being dropped from inside the registry;
        // the inactive entry is pruned on the next drain instead.
        if let Ok(mut inner) = state.try_borrow_mut() {
            let id = self.subscriber.id;
            inner.subscribers.retain(|s| s.id != id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.subscriber.id)
            .field("active", &self.subscriber.active.get())
            .finish()
    }
}

/// Stream of logged-in flags. Never terminates while subscribed.
pub struct LoggedInStream {
    receiver: mpsc::UnboundedReceiver<bool>,
    _subscription: Subscription,
}

impl Stream for LoggedInStream {
    type Item = bool;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<bool>> {
        self.receiver.poll_next_unpin(cx)
    }
}
