//! Logging setup for the boundary and the demo harness.
//!
//! Boundaries log every transition (capture, countdown, reset, dispatch,
//! connectivity) through `tracing`. This module installs the subscriber:
//! - Writes to stderr so stdout stays free for rendered surfaces and JSON
//! - Honours `RUST_LOG`, otherwise uses the configured level
//! - Includes timestamps unless disabled

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Log level for this crate's events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Every countdown tick and stale event
    Trace,
    /// Transitions and dispatched actions
    Debug,
    /// Captures, resets and recoveries (default)
    #[default]
    Info,
    /// Only failures and panicking callbacks
    Warn,
    /// Only fallback failures
    Error,
    /// Nothing at all
    Off,
}

impl LogLevel {
    /// The `EnvFilter` directive for this level.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            // Off is handled by the filter directive.
            LogLevel::Error | LogLevel::Off => Level::ERROR,
        }
    }
}

impl From<u8> for LogLevel {
    /// 0 = Info, 1 = Debug, 2+ = Trace
    fn from(verbosity: u8) -> Self {
        match verbosity {
            0 => LogLevel::Info,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// Subscriber configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub with_timestamps: bool,
    /// Include the module path of each event.
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            with_timestamps: true,
            with_target: true,
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.with_timestamps = enabled;
        self
    }

    pub fn with_target(mut self, enabled: bool) -> Self {
        self.with_target = enabled;
        self
    }

    /// Maps command-line flags: `--quiet` keeps warnings and errors only,
    /// otherwise each `-v` raises the level one step.
    pub fn from_flags(verbosity: u8, quiet: bool) -> Self {
        let level = if quiet {
            LogLevel::Warn
        } else {
            LogLevel::from(verbosity)
        };
        Self::default().with_level(level)
    }

    /// Filter used when `RUST_LOG` is unset.
    ///
    /// Dependencies stay at warn so `-vv` does not drown the countdown in
    /// runtime internals.
    pub fn filter_directive(&self) -> String {
        match self.level {
            LogLevel::Off => "off".to_string(),
            level => format!("warn,recoverykit={}", level.as_str()),
        }
    }
}

/// Installs the global subscriber.
///
/// Returns false when a subscriber was already installed, which makes it
/// safe to call from several tests.
///
/// # Examples
///
/// ```no_run
/// use recoverykit::logging::{init_logging, LoggingConfig, LogLevel};
///
/// init_logging(LoggingConfig::new().with_level(LogLevel::Debug));
/// ```
pub fn init_logging(config: LoggingConfig) -> bool {
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(config.filter_directive())
    };

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(config.with_target);

    let installed = if config.with_timestamps {
        subscriber.try_init()
    } else {
        subscriber.without_time().try_init()
    };
    installed.is_ok()
}
