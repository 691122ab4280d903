//! Role checks against the live session. Never cached: each call reads the
//! current identity, so login and logout are reflected immediately.

use crate::auth::{
    state::AuthContext,
    types::{Identity, Role},
};

pub trait RoleOracle {
    /// The identity the answers are computed from.
    fn current_identity(&self) -> Option<Identity>;

    /// True iff there is a current identity and it holds `role`.
    fn has_role(&self, role: Role) -> bool {
        self.current_role() == Some(role)
    }

    fn current_role(&self) -> Option<Role> {
        self.current_identity().map(|identity| identity.role)
    }
}

impl RoleOracle for AuthContext {
    fn current_identity(&self) -> Option<Identity> {
        self.identity()
    }
}

impl RoleOracle for Option<Identity> {
    fn current_identity(&self) -> Option<Identity> {
        self.clone()
    }
}
