//! Boundary configuration.
//!
//! [`BoundaryConfig`] holds every recognized option with documented
//! defaults. It is built in code with the `with_*` methods or loaded from a
//! TOML file with environment overrides.

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

use crate::error::StatusOverrides;
use crate::recovery::RecoveryUrls;
use crate::retry::RetryPolicy;

/// Prefix for environment overrides, e.g. `RECOVERYKIT__MAX_RETRIES=5`.
pub const ENV_PREFIX: &str = "RECOVERYKIT";

/// Which boundary flavour to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryVariant {
    /// Guards a whole page: fixed retry delay, details panel, SEO title.
    #[default]
    Page,
    /// Guards a data-backed section: exponential backoff, connectivity
    /// tracking, health badge.
    Service,
}

/// Errors that can occur when loading a boundary configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// The configuration file could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] config::ConfigError),

    /// Inline TOML could not be parsed.
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Options recognized by a boundary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    /// Boundary flavour. Default: page.
    pub variant: BoundaryVariant,
    /// Name used in logs and error callbacks.
    pub name: Option<String>,
    pub home_url: Option<String>,
    pub login_url: Option<String>,
    pub contact_url: Option<String>,
    pub status_page_url: Option<String>,
    /// Retry retryable failures automatically. Default: false.
    pub enable_auto_retry: bool,
    /// Attempt budget before automatic retry stops offering itself. Default: 3.
    pub max_retries: u32,
    /// Retry delay; the base delay for the service variant. Default: 3000.
    pub retry_delay_ms: u64,
    /// Service variant backoff multiplier. Default: 2.0.
    pub backoff_multiplier: f64,
    /// Service variant delay cap. Default: 60000.
    pub max_retry_delay_ms: u64,
    /// Optimistic "retrying" window before a manual retry resets. Default: 500.
    pub manual_retry_delay_ms: u64,
    /// Emit analytics events. Default: false.
    pub enable_analytics: bool,
    /// Page variant: set the document title per kind. Default: false.
    pub enable_seo: bool,
    /// Classify status-less failures from their message. Default: false.
    pub detect_from_message: bool,
    /// Per-status retryability overrides.
    pub status_overrides: StatusOverrides,
    /// Service variant connectivity poll period. Default: 30000.
    pub connectivity_poll_ms: u64,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            variant: BoundaryVariant::Page,
            name: None,
            home_url: None,
            login_url: None,
            contact_url: None,
            status_page_url: None,
            enable_auto_retry: false,
            max_retries: 3,
            retry_delay_ms: 3000,
            backoff_multiplier: 2.0,
            max_retry_delay_ms: 60_000,
            manual_retry_delay_ms: 500,
            enable_analytics: false,
            enable_seo: false,
            detect_from_message: false,
            status_overrides: StatusOverrides::default(),
            connectivity_poll_ms: 30_000,
        }
    }
}

impl BoundaryConfig {
    /// Creates a page boundary configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service boundary configuration with default values.
    pub fn service() -> Self {
        Self::default().with_variant(BoundaryVariant::Service)
    }

    /// Loads a configuration from a TOML file.
    ///
    /// Environment variables of the form `RECOVERYKIT__<KEY>` override
    /// values from the file (e.g. `RECOVERYKIT__MAX_RETRIES=5`).
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be parsed, or
    /// holds out-of-range values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: BoundaryConfig = settings.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Parses a configuration from TOML text, without environment
    /// overrides.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let parsed: BoundaryConfig = toml::from_str(text)?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.backoff_multiplier.is_finite() || self.backoff_multiplier < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "backoff_multiplier must be a finite number >= 1.0, got {}",
                self.backoff_multiplier
            )));
        }
        // The cap only bounds the service backoff.
        if self.variant == BoundaryVariant::Service
            && self.max_retry_delay_ms < self.retry_delay_ms
        {
            return Err(ConfigError::Invalid(format!(
                "max_retry_delay_ms ({}) is below retry_delay_ms ({})",
                self.max_retry_delay_ms, self.retry_delay_ms
            )));
        }
        Ok(())
    }

    pub fn with_variant(mut self, variant: BoundaryVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_home_url(mut self, url: impl Into<String>) -> Self {
        self.home_url = Some(url.into());
        self
    }

    pub fn with_login_url(mut self, url: impl Into<String>) -> Self {
        self.login_url = Some(url.into());
        self
    }

    pub fn with_contact_url(mut self, url: impl Into<String>) -> Self {
        self.contact_url = Some(url.into());
        self
    }

    pub fn with_status_page_url(mut self, url: impl Into<String>) -> Self {
        self.status_page_url = Some(url.into());
        self
    }

    pub fn with_auto_retry(mut self, enabled: bool) -> Self {
        self.enable_auto_retry = enabled;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    pub fn with_manual_retry_delay(mut self, delay: Duration) -> Self {
        self.manual_retry_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn with_analytics(mut self, enabled: bool) -> Self {
        self.enable_analytics = enabled;
        self
    }

    pub fn with_seo(mut self, enabled: bool) -> Self {
        self.enable_seo = enabled;
        self
    }

    pub fn with_message_detection(mut self, enabled: bool) -> Self {
        self.detect_from_message = enabled;
        self
    }

    pub fn with_status_overrides(mut self, overrides: StatusOverrides) -> Self {
        self.status_overrides = overrides;
        self
    }

    pub fn with_connectivity_poll(mut self, period: Duration) -> Self {
        self.connectivity_poll_ms = period.as_millis() as u64;
        self
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn manual_retry_delay(&self) -> Duration {
        Duration::from_millis(self.manual_retry_delay_ms)
    }

    pub fn connectivity_poll(&self) -> Duration {
        Duration::from_millis(self.connectivity_poll_ms)
    }

    /// Destinations for the recovery planner.
    pub fn urls(&self) -> RecoveryUrls {
        RecoveryUrls {
            home: self.home_url.clone(),
            login: self.login_url.clone(),
            contact: self.contact_url.clone(),
            status_page: self.status_page_url.clone(),
        }
    }

    /// Retry policy for the configured variant.
    pub fn retry_policy(&self) -> RetryPolicy {
        match self.variant {
            BoundaryVariant::Page => RetryPolicy::fixed(self.retry_delay()),
            BoundaryVariant::Service => {
                let cap = self.max_retry_delay_ms.max(self.retry_delay_ms);
                RetryPolicy::exponential(self.retry_delay(), self.backoff_multiplier)
                    .with_max_delay(Duration::from_millis(cap))
            }
        }
    }
}
