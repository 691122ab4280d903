use crate::cli::commands::{ARG_API_URL, ARG_SESSION_DIR, ARG_TIMEOUT};
use crate::config::{AppConfig, Overrides};
use anyhow::{Context, Result};

/// Arguments shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub api_url: Option<String>,
    pub session_dir: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl GlobalArgs {
    #[must_use]
    pub fn from_matches(matches: &clap::ArgMatches) -> Self {
        Self {
            api_url: matches.get_one::<String>(ARG_API_URL).cloned(),
            session_dir: matches.get_one::<String>(ARG_SESSION_DIR).cloned(),
            timeout_secs: matches.get_one::<u64>(ARG_TIMEOUT).copied(),
        }
    }

    /// # Errors
    /// Returns an error if the values do not form a valid configuration.
    pub fn config(&self) -> Result<AppConfig> {
        AppConfig::load(Overrides {
            api_base_url: self.api_url.clone(),
            session_dir: self.session_dir.clone(),
            timeout_secs: self.timeout_secs,
        })
        .context("invalid client configuration")
    }
}
