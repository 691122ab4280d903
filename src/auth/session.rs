//! The auth client: the only component that changes who is signed in. It
//! talks to the backend, then updates the session store and the in-memory
//! context, in that order, and only after a successful response.
//!
//! Login results are tagged with the session epoch observed when the request
//! started. `logout` and `abandon_pending` advance the epoch, so a response
//! that lands afterwards is dropped instead of resurrecting a stale session.
//! Concurrent logins are not serialized; the last one to complete wins.

use crate::{
    api::ApiClient,
    auth::{
        client,
        error::AuthError,
        state::AuthContext,
        store::{FileStorage, SessionStore, Storage},
        types::{CreatedAccount, Identity, Role, SigninRequest, SignupRequest},
    },
    config::AppConfig,
    errors::AppError,
};
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use std::sync::{
    atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
    Arc,
};
use tracing::{debug, info, instrument};

pub struct AuthClient<S> {
    api: ApiClient,
    store: SessionStore<S>,
    context: AuthContext,
    epoch: AtomicU64,
    in_flight: Arc<AtomicUsize>,
    bootstrapped: AtomicBool,
}

impl AuthClient<FileStorage> {
    /// Client persisting its session under the configured directory, scoped to
    /// the backend origin.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let api = ApiClient::new(config)?;
        Ok(Self::new(api, FileStorage::new(config.origin_session_dir())))
    }
}

impl<S: Storage> AuthClient<S> {
    pub fn new(api: ApiClient, storage: S) -> Self {
        Self {
            api,
            store: SessionStore::new(storage),
            context: AuthContext::new(),
            epoch: AtomicU64::new(0),
            in_flight: Arc::new(AtomicUsize::new(0)),
            bootstrapped: AtomicBool::new(false),
        }
    }

    pub fn context(&self) -> &AuthContext {
        &self.context
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    /// True while a signup or login request is in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Rehydrates the in-memory identity from the store. Only the first call
    /// reads storage; later calls return the current identity. The backend is
    /// not contacted.
    pub fn bootstrap(&self) -> Option<Identity> {
        if self.bootstrapped.swap(true, Ordering::SeqCst) {
            return self.context.identity();
        }

        match self.store.read() {
            Some(identity) => {
                debug!(role = %identity.role, "Restored stored session");
                self.context.set_session(identity.clone());
                Some(identity)
            }
            None => {
                debug!("No stored session");
                None
            }
        }
    }

    /// Registers an account. The caller signs in separately afterwards.
    ///
    /// # Errors
    /// `InvalidInput` for empty fields, a malformed email or a role that cannot
    /// be self-assigned; `Signup` when the backend refuses; `Transport` when it
    /// cannot be reached.
    #[instrument(skip_all, fields(role = %role))]
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: SecretString,
        role: Role,
    ) -> Result<CreatedAccount, AuthError> {
        let name = required(name, "Name")?;
        let email = required(email, "Email")?;
        if !valid_email(&email) {
            return Err(AuthError::InvalidInput(
                "Email address is not valid".to_string(),
            ));
        }
        if password.expose_secret().is_empty() {
            return Err(AuthError::InvalidInput("Password is required".to_string()));
        }
        if !role.is_self_assignable() {
            return Err(AuthError::InvalidInput(
                "Role must be STUDENT or TUTOR".to_string(),
            ));
        }

        let request = SignupRequest {
            name,
            email,
            password,
            role,
        };

        let _loading = InFlight::start(&self.in_flight);
        let account = client::signup(&self.api, &request)
            .await
            .map_err(AuthError::from_signup)?;

        info!("Account created");
        Ok(account)
    }

    /// Signs in, persists the identity and publishes it to the context.
    ///
    /// # Errors
    /// `InvalidInput` for empty fields; `Credentials` when the backend rejects
    /// the login; `Transport` when it cannot be reached; `Superseded` when a
    /// logout happened while the request was in flight. The session is left
    /// untouched on every error.
    #[instrument(skip_all)]
    pub async fn login(&self, email: &str, password: SecretString) -> Result<Identity, AuthError> {
        let email = required(email, "Email")?;
        if password.expose_secret().is_empty() {
            return Err(AuthError::InvalidInput("Password is required".to_string()));
        }

        let epoch = self.epoch.load(Ordering::SeqCst);
        let request = SigninRequest { email, password };

        let identity = {
            let _loading = InFlight::start(&self.in_flight);
            client::signin(&self.api, &request)
                .await
                .map_err(AuthError::from_login)?
        };

        if self.epoch.load(Ordering::SeqCst) != epoch {
            info!("Discarding login response that arrived after the session ended");
            return Err(AuthError::Superseded);
        }

        self.store.write(&identity);
        self.context.set_session(identity.clone());
        self.bootstrapped.store(true, Ordering::SeqCst);

        info!(role = %identity.role, "Signed in");
        Ok(identity)
    }

    /// Ends the session. Safe to call when already signed out.
    pub fn logout(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.store.clear();
        self.context.clear_session();
        info!("Signed out");
    }

    /// Drops the results of any requests still in flight, e.g. on unmount.
    pub fn abandon_pending(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }
}

/// Counts a request as in flight until dropped.
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn start(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

fn required(value: &str, field: &str) -> Result<String, AuthError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(AuthError::InvalidInput(format!("{field} is required")))
    } else {
        Ok(trimmed.to_string())
    }
}

fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}
