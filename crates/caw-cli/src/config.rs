//! Client configuration.

use std::time::Duration;

use crate::cli::Cli;
use crate::client::DEFAULT_CALL_DEADLINE;
use crate::error::CliError;
use crate::transport::DEFAULT_CONNECT_TIMEOUT;

/// Default Faz service URL.
pub const DEFAULT_FAZ_URL: &str = "ws://localhost:50000";

/// Settings for one client session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Faz service URL.
    pub faz_url: String,
    /// Time allowed to establish the connection.
    pub connect_timeout: Duration,
    /// Deadline applied to every call.
    pub call_deadline: Duration,
}

impl ClientConfig {
    /// Create a configuration for the given URL with default timeouts.
    #[must_use]
    pub fn new(faz_url: impl Into<String>) -> Self {
        Self {
            faz_url: faz_url.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            call_deadline: DEFAULT_CALL_DEADLINE,
        }
    }

    /// Build from parsed command-line arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting configuration is invalid.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let config = Self::new(cli.faz.clone())
            .with_connect_timeout(Duration::from_secs(cli.connect_timeout_secs))
            .with_call_deadline(Duration::from_secs(cli.deadline_secs));
        config.validate()?;
        Ok(config)
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the per-call deadline.
    #[must_use]
    pub const fn with_call_deadline(mut self, deadline: Duration) -> Self {
        self.call_deadline = deadline;
        self
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] for a non-WebSocket URL or a zero duration.
    pub fn validate(&self) -> Result<(), CliError> {
        if !self.faz_url.starts_with("ws://") && !self.faz_url.starts_with("wss://") {
            return Err(CliError::Config(format!(
                "invalid faz URL: {}, must start with ws:// or wss://",
                self.faz_url
            )));
        }
        if self.connect_timeout.is_zero() {
            return Err(CliError::Config("connect timeout must be positive".into()));
        }
        if self.call_deadline.is_zero() {
            return Err(CliError::Config("call deadline must be positive".into()));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FAZ_URL)
    }
}
