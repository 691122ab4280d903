//! Auth feature module: session persistence, the signup/login/logout client,
//! role checks and the route guard. It keeps authentication logic out of the
//! views and must stay aligned with the backend's auth endpoints. Passwords
//! travel as `SecretString` and are never logged or persisted.
//!
//! Flow Overview: on mount the client rehydrates the identity from the session
//! store and the guard leaves `Bootstrapping`. Signup only registers; a login
//! follows it. Login writes the store, then the context. Logout clears both and
//! the guard sends the user to `/login`.

pub mod client;
pub mod error;
pub mod guards;
pub mod roles;
pub mod session;
pub mod state;
pub mod store;
pub mod types;

pub use error::AuthError;
pub use guards::{GuardDecision, GuardState, RouteGuard};
pub use roles::RoleOracle;
pub use session::AuthClient;
pub use state::AuthContext;
pub use store::{FileStorage, MemoryStorage, SessionStore, Storage};
pub use types::{Identity, Role, UserId};
