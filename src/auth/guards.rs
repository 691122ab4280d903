//! Route guard state machine.
//!
//! ```text
//! Bootstrapping --bootstrap(Some)--> Authenticated
//! Bootstrapping --bootstrap(None)--> Unauthenticated
//! Authenticated --logged_out------> Unauthenticated
//! Unauthenticated --logged_in-----> Authenticated
//! ```
//!
//! The guard is UX only; the backend must still enforce access.

use crate::navigation::{is_login_route, Navigator, LOGIN_ROUTE};
use std::{fmt, sync::Arc};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardState {
    Bootstrapping,
    Authenticated,
    Unauthenticated,
}

/// What the host should show for a path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Neutral loading indicator; nothing from the page.
    Loading,
    /// The login page, outside the protected frame.
    Public,
    /// The requested page inside the protected frame.
    Render,
    /// Nothing rendered; navigation to the target was requested.
    Redirect(String),
}

pub struct RouteGuard {
    state: GuardState,
    navigator: Arc<dyn Navigator>,
}

impl fmt::Debug for RouteGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteGuard")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl RouteGuard {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self {
            state: GuardState::Bootstrapping,
            navigator,
        }
    }

    #[must_use]
    pub const fn state(&self) -> GuardState {
        self.state
    }

    /// Leaves `Bootstrapping` once the stored session has been read. Returns
    /// false, changing nothing, if the guard already bootstrapped.
    pub fn bootstrap(&mut self, authenticated: bool) -> bool {
        if self.state != GuardState::Bootstrapping {
            debug!("Ignoring repeated bootstrap");
            return false;
        }
        self.state = if authenticated {
            GuardState::Authenticated
        } else {
            GuardState::Unauthenticated
        };
        debug!(state = ?self.state, "Guard bootstrapped");
        true
    }

    /// Returns false when not in `Unauthenticated`.
    pub fn logged_in(&mut self) -> bool {
        self.transition(GuardState::Unauthenticated, GuardState::Authenticated)
    }

    /// Returns false when not in `Authenticated`.
    pub fn logged_out(&mut self) -> bool {
        self.transition(GuardState::Authenticated, GuardState::Unauthenticated)
    }

    fn transition(&mut self, from: GuardState, to: GuardState) -> bool {
        if self.state != from {
            return false;
        }
        debug!(?from, ?to, "Guard transition");
        self.state = to;
        true
    }

    /// Decides what `path` shows in the current state. Redirects are issued
    /// through the injected navigator.
    pub fn evaluate(&self, path: &str) -> GuardDecision {
        if is_login_route(path) {
            return GuardDecision::Public;
        }

        match self.state {
            GuardState::Bootstrapping => GuardDecision::Loading,
            GuardState::Authenticated => GuardDecision::Render,
            GuardState::Unauthenticated => {
                self.navigator.navigate(LOGIN_ROUTE);
                GuardDecision::Redirect(LOGIN_ROUTE.to_string())
            }
        }
    }
}
