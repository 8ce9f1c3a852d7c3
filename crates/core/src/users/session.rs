//! In-memory session provider.

use log::{debug, info};
use tokio::sync::watch;

use super::{User, UserProvider};

/// Value published on every session change.
///
/// A watch channel only keeps the latest value, so a sign-out immediately
/// followed by a sign-in can reach observers as one update. `sign_ins`
/// counts every absent to present transition, which lets observers detect
/// a new session even when they never saw the empty state in between.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub sign_ins: u64,
}

/// Holds the signed-in user and broadcasts every identity change.
///
/// Observers get a [`watch::Receiver`] from [`SessionStore::subscribe`]; the
/// receiver always starts from the current value, so late subscribers see
/// the user that is already signed in.
#[derive(Debug)]
pub struct SessionStore {
    sender: watch::Sender<SessionSnapshot>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(SessionSnapshot::default());
        Self { sender }
    }

    /// Start (or replace) the session with `user`.
    ///
    /// Replacing a signed-in user does not count as a new sign-in.
    pub fn sign_in(&self, user: User) {
        info!("[Session] Signed in {} as {}", user.email, user.role);
        self.sender.send_modify(|session| {
            if session.user.is_none() {
                session.sign_ins += 1;
            }
            session.user = Some(user);
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.sender.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserProvider for SessionStore {
    fn current_user(&self) -> Option<User> {
        self.sender.borrow().user.clone()
    }

    fn sign_out(&self) {
        let changed = self
            .sender
            .send_if_modified(|session| session.user.take().is_some());
        if changed {
            info!("[Session] Signed out");
        } else {
            debug!("[Session] Sign out requested with no active session");
        }
    }
}
