//! In-memory auth state. `AuthContext` owns the current identity behind a
//! `watch` channel so every dependent view observes login and logout as soon as
//! they happen. A context is constructed per client; there is no global.

use crate::auth::types::Identity;
use tokio::sync::watch;

/// Current identity shared between the auth client, the guard and the views.
#[derive(Clone, Debug)]
pub struct AuthContext {
    session: watch::Sender<Option<Identity>>,
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthContext {
    #[must_use]
    pub fn new() -> Self {
        let (session, _) = watch::channel(None);
        Self { session }
    }

    /// Snapshot of the current identity.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.session.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_some()
    }

    /// Receiver that is notified on every session change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.session.subscribe()
    }

    /// Replaces the in-memory session after login.
    pub(crate) fn set_session(&self, identity: Identity) {
        self.session.send_replace(Some(identity));
    }

    /// Clears the in-memory session, typically on logout.
    pub(crate) fn clear_session(&self) {
        self.session.send_replace(None);
    }
}
