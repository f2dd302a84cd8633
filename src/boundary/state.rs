//! Snapshot of a boundary's state.

use crate::error::{ErrorMetadata, Failure};
use crate::retry::RetryPhase;

/// Point-in-time view of everything a boundary tracks.
#[derive(Debug, Clone)]
pub struct BoundaryState {
    pub has_failure: bool,
    pub captured_error: Option<Failure>,
    pub metadata: Option<ErrorMetadata>,
    /// Attempts spent since the last successful recovery.
    pub retry_attempt: u32,
    /// A countdown is running or a manual retry is in flight.
    pub is_retrying: bool,
    pub retry_countdown_seconds: u32,
    pub retry_phase: RetryPhase,
    /// Page variant only; always false for the service variant.
    pub details_visible: bool,
    /// Service variant only; always true for the page variant.
    pub network_online: bool,
}

impl BoundaryState {
    /// The state of a freshly mounted boundary.
    pub fn all_clear() -> Self {
        Self {
            has_failure: false,
            captured_error: None,
            metadata: None,
            retry_attempt: 0,
            is_retrying: false,
            retry_countdown_seconds: 0,
            retry_phase: RetryPhase::Idle,
            details_visible: false,
            network_online: true,
        }
    }

    /// True when nothing is held and no retry is pending.
    pub fn is_all_clear(&self) -> bool {
        !self.has_failure
            && self.metadata.is_none()
            && !self.is_retrying
            && self.retry_countdown_seconds == 0
    }

    /// Lists the state invariants this snapshot breaks, if any.
    pub fn violations(&self, max_retries: u32) -> Vec<&'static str> {
        let mut broken = Vec::new();
        if self.has_failure != self.captured_error.is_some() {
            broken.push("has_failure must match captured_error");
        }
        if self.has_failure != self.metadata.is_some() {
            broken.push("has_failure must match metadata");
        }
        if self.retry_countdown_seconds > 0 && !self.is_retrying {
            broken.push("a running countdown implies is_retrying");
        }
        if self.retry_attempt > max_retries {
            broken.push("retry_attempt exceeds max_retries");
        }
        broken
    }

    pub fn is_consistent(&self, max_retries: u32) -> bool {
        self.violations(max_retries).is_empty()
    }
}

impl Default for BoundaryState {
    fn default() -> Self {
        Self::all_clear()
    }
}
