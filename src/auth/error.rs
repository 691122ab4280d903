use crate::errors::AppError;
use thiserror::Error;
use tracing::warn;

pub const SIGNUP_FALLBACK: &str = "Signup failed";
pub const LOGIN_FALLBACK: &str = "Login failed";
pub const TRANSPORT_FALLBACK: &str = "Unable to reach the server. Please try again.";
pub const UNEXPECTED_RESPONSE: &str = "Unexpected response from the server. Please try again.";

/// Every auth failure surfaced to the UI. `Display` is the user-facing message.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Rejected locally before any request was sent.
    #[error("{0}")]
    InvalidInput(String),
    /// The backend refused to create the account.
    #[error("{message}")]
    Signup { status: u16, message: String },
    /// Bad credentials or another backend-reported login failure.
    #[error("{message}")]
    Credentials { status: u16, message: String },
    /// The backend could not be reached or answered with something unusable.
    #[error("{0}")]
    Transport(String),
    /// A logout or unmount happened while the request was in flight.
    #[error("Login was cancelled")]
    Superseded,
}

impl AuthError {
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub(crate) fn from_signup(err: AppError) -> Self {
        match err {
            AppError::Http { status, message } => Self::Signup {
                status,
                message: non_empty_or(message, SIGNUP_FALLBACK),
            },
            other => transport(&other),
        }
    }

    pub(crate) fn from_login(err: AppError) -> Self {
        match err {
            AppError::Http { status, message } => Self::Credentials {
                status,
                message: non_empty_or(message, LOGIN_FALLBACK),
            },
            other => transport(&other),
        }
    }
}

fn transport(err: &AppError) -> AuthError {
    warn!("Auth request failed: {err}");
    let message = match err {
        // The backend answered, just not with something usable.
        AppError::Parse(_) => UNEXPECTED_RESPONSE,
        _ => TRANSPORT_FALLBACK,
    };
    AuthError::Transport(message.to_string())
}

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
