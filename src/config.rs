//! Client configuration for the backend base URL, the session directory and the
//! request timeout. Values arrive from the CLI (which already folds in the
//! `EDULINK_*` environment variables); blank values fall back to defaults.
//! Configuration values are public; do not store secrets here.

use crate::errors::AppError;
use std::{env, path::PathBuf, time::Duration};
use url::Url;

/// Backend used when nothing is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
/// Default request timeout (seconds) applied to every HTTP call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Directory under `$HOME` holding persisted sessions.
const SESSION_DIR_NAME: &str = ".edulink";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub session_dir: PathBuf,
    pub timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            session_dir: default_session_dir(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Optional values that replace the defaults when present and non-blank.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub api_base_url: Option<String>,
    pub session_dir: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Builds a config from defaults plus overrides and validates the base URL.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the base URL is not an absolute http(s) URL
    /// or the timeout is zero.
    pub fn load(overrides: Overrides) -> Result<Self, AppError> {
        let mut config = Self::default();
        apply_overrides(&mut config, overrides);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        let url = Url::parse(&self.api_base_url)
            .map_err(|err| AppError::Config(format!("Invalid API base URL: {err}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "Unsupported API scheme: {}",
                url.scheme()
            )));
        }

        if self.timeout.is_zero() {
            return Err(AppError::Config("Timeout must be positive".to_string()));
        }

        Ok(())
    }

    /// Directory holding the session for this backend origin. Sessions are
    /// scoped per origin the same way browser storage is.
    #[must_use]
    pub fn origin_session_dir(&self) -> PathBuf {
        self.session_dir.join(origin_key(&self.api_base_url))
    }
}

fn apply_overrides(config: &mut AppConfig, overrides: Overrides) {
    if let Some(value) = overrides.api_base_url.as_deref().and_then(normalize_value) {
        config.api_base_url = value.trim_end_matches('/').to_string();
    }
    if let Some(value) = overrides.session_dir.as_deref().and_then(normalize_value) {
        config.session_dir = PathBuf::from(value);
    }
    if let Some(secs) = overrides.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn default_session_dir() -> PathBuf {
    env::var_os("HOME").map_or_else(
        || PathBuf::from(SESSION_DIR_NAME),
        |home| PathBuf::from(home).join(SESSION_DIR_NAME),
    )
}

/// Filesystem-safe name for the scheme, host and port of `base_url`.
fn origin_key(base_url: &str) -> String {
    let Ok(url) = Url::parse(base_url) else {
        return "default".to_string();
    };

    let host = url.host_str().unwrap_or("localhost");
    let origin = match url.port_or_known_default() {
        Some(port) => format!("{}_{host}_{port}", url.scheme()),
        None => format!("{}_{host}", url.scheme()),
    };

    origin
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
