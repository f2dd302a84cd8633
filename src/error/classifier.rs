//! Failure classification.
//!
//! [`ErrorClassifier::classify`] turns a [`Failure`] into [`ErrorMetadata`].
//! It never fails: unrecognized input becomes `unknown` and non-retryable.

use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use serde::Deserialize;

use super::classification::{CONTEXT_ENDPOINT, CONTEXT_REQUEST_ID};
use super::{ErrorKind, ErrorMetadata, Failure, MessageDetector};

/// Per-status overrides of the kind's default retryability.
///
/// The deny-list is consulted before the allow-list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StatusOverrides {
    /// Status codes that are never retried.
    pub never_retry: BTreeSet<u16>,
    /// Status codes that are always retried.
    pub always_retry: BTreeSet<u16>,
}

impl StatusOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deny(mut self, status: u16) -> Self {
        self.never_retry.insert(status);
        self
    }

    pub fn allow(mut self, status: u16) -> Self {
        self.always_retry.insert(status);
        self
    }

    /// Resolves retryability for `status`, falling back to `default`.
    pub fn resolve(&self, status: Option<u16>, default: bool) -> bool {
        match status {
            Some(code) if self.never_retry.contains(&code) => false,
            Some(code) if self.always_retry.contains(&code) => true,
            _ => default,
        }
    }
}

/// Maps failures onto the error taxonomy.
#[derive(Debug, Clone, Default)]
pub struct ErrorClassifier {
    overrides: StatusOverrides,
    detector: Option<MessageDetector>,
}

impl ErrorClassifier {
    /// Creates a classifier with no overrides and no message detection.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(mut self, overrides: StatusOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Enables message detection for failures that carry no status.
    pub fn with_detector(mut self, detector: MessageDetector) -> Self {
        self.detector = Some(detector);
        self
    }

    pub fn overrides(&self) -> &StatusOverrides {
        &self.overrides
    }

    /// Classifies a failure.
    pub fn classify(&self, failure: &Failure) -> ErrorMetadata {
        let kind = self.kind_of(failure);
        let status_code = failure.status();
        let retryable = self.overrides.resolve(status_code, kind.default_retryable());

        let mut context = HashMap::new();
        if let Some(endpoint) = failure.endpoint() {
            context.insert(CONTEXT_ENDPOINT.to_string(), endpoint.to_string());
        }
        if let Some(request_id) = failure.request_id() {
            context.insert(CONTEXT_REQUEST_ID.to_string(), request_id.to_string());
        }

        ErrorMetadata {
            kind,
            status_code,
            retryable,
            severity: kind.severity(),
            timestamp: Utc::now(),
            context,
        }
    }

    fn kind_of(&self, failure: &Failure) -> ErrorKind {
        if let Some(status) = failure.status() {
            return ErrorKind::from_status(status);
        }
        self.detector
            .as_ref()
            .and_then(|detector| detector.detect(failure.message()))
            .unwrap_or(ErrorKind::Unknown)
    }
}
