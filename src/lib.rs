//! # Edulink (session and access core)
//!
//! `edulink` is the client-side core of the Edulink task dashboard: it signs
//! tutors and students in against the REST backend, keeps the session across
//! restarts and decides what each role may see.
//!
//! ## Session
//!
//! The identity (`{id, email, name, role}`) is stored as one JSON object under
//! the `user` key of an origin-scoped store. It is a display and routing
//! record, not a credential: tokens returned by the backend are dropped. A
//! corrupted store reads as "signed out" and never aborts the app.
//!
//! ## Access
//!
//! Roles are `STUDENT`, `TUTOR` and `ADMIN`; only the first two can be chosen
//! at signup. Students, Reports and Statistics are tutor-only. All of this is
//! UX gating; the backend remains the authority.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod errors;
pub mod navigation;
pub mod shell;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
