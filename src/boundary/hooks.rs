//! Host callbacks: error reporting and analytics.
//!
//! Callbacks are best-effort notifications. A panicking callback is caught
//! and logged; it never disturbs the boundary.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use super::BoundaryVariant;
use crate::error::{ErrorKind, ErrorMetadata, Failure};

/// Called once per caught failure.
pub type ErrorHook = Arc<dyn Fn(&Failure, &RenderInfo) + Send + Sync>;

/// Called for every analytics event.
pub type AnalyticsHook = Arc<dyn Fn(&AnalyticsEvent) + Send + Sync>;

/// Where a failure was caught.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderInfo {
    /// Configured boundary name, if any.
    pub boundary: Option<String>,
    pub variant: BoundaryVariant,
    /// Retry attempts already spent when the failure was caught.
    pub retry_attempt: u32,
}

/// Analytics event names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalyticsEventType {
    ErrorDisplayed,
    ErrorRetry,
    ErrorResolved,
}

impl fmt::Display for AnalyticsEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalyticsEventType::ErrorDisplayed => "error-displayed",
            AnalyticsEventType::ErrorRetry => "error-retry",
            AnalyticsEventType::ErrorResolved => "error-resolved",
        };
        f.write_str(name)
    }
}

/// One analytics event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub event: AnalyticsEventType,
    pub kind: ErrorKind,
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_attempt: Option<u32>,
    pub timestamp_ms: i64,
}

impl AnalyticsEvent {
    pub fn new(event: AnalyticsEventType, metadata: &ErrorMetadata) -> Self {
        Self {
            event,
            kind: metadata.kind,
            status_code: metadata.status_code,
            retry_attempt: None,
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn with_retry_attempt(mut self, attempt: u32) -> Self {
        self.retry_attempt = Some(attempt);
        self
    }
}

/// Host callbacks attached to a boundary.
#[derive(Clone, Default)]
pub struct Hooks {
    on_error: Option<ErrorHook>,
    on_analytics_event: Option<AnalyticsHook>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Failure, &RenderInfo) + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(hook));
        self
    }

    pub fn on_analytics_event<F>(mut self, hook: F) -> Self
    where
        F: Fn(&AnalyticsEvent) + Send + Sync + 'static,
    {
        self.on_analytics_event = Some(Arc::new(hook));
        self
    }

    pub(crate) fn error(&self, failure: &Failure, info: &RenderInfo) {
        if let Some(hook) = &self.on_error {
            isolate("on_error", || hook(failure, info));
        }
    }

    pub(crate) fn analytics(&self, event: &AnalyticsEvent) {
        if let Some(hook) = &self.on_analytics_event {
            isolate("on_analytics_event", || hook(event));
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_error", &self.on_error.is_some())
            .field("on_analytics_event", &self.on_analytics_event.is_some())
            .finish()
    }
}

/// Runs a host callback, swallowing and logging a panic.
///
/// Returns false when the callback panicked.
pub(crate) fn isolate<F: FnOnce()>(name: &str, callback: F) -> bool {
    match catch_unwind(AssertUnwindSafe(callback)) {
        Ok(()) => true,
        Err(payload) => {
            let failure = Failure::from_panic(payload);
            warn!(callback = name, error = %failure, "host callback panicked");
            false
        }
    }
}
