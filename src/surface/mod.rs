//! The built-in recovery surface.
//!
//! [`RecoverySurface`] is a plain value describing what the boundary shows
//! while it holds a failure: a status indicator, title and description, the
//! recovery action buttons, an optional countdown banner, an optional health
//! badge and a collapsible details panel. [`SurfaceRenderer`] turns it into
//! terminal text.

pub mod panel;
pub mod render;
pub mod theme;

use serde::Serialize;

pub use panel::{DetailsPanel, PanelState};
pub use render::SurfaceRenderer;
pub use theme::Theme;

use crate::boundary::HealthStatus;
use crate::error::{ErrorKind, ErrorMetadata, Failure, Severity};
use crate::recovery::{RecoveryAction, RecoveryActionType};

/// A recovery button as shown on the surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceAction {
    pub action_type: RecoveryActionType,
    pub label: String,
    pub is_primary: bool,
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_url: Option<String>,
}

impl From<&RecoveryAction> for SurfaceAction {
    fn from(action: &RecoveryAction) -> Self {
        Self {
            action_type: action.action_type,
            label: action.label.clone(),
            is_primary: action.is_primary,
            disabled: action.disabled,
            destination_url: action.destination_url.clone(),
        }
    }
}

/// Everything the default recovery view displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoverySurface {
    /// Status code when known, otherwise the upper-cased kind.
    pub status_indicator: String,
    pub kind: ErrorKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub actions: Vec<SurfaceAction>,
    /// Seconds until the automatic retry, while one is counting down.
    pub countdown_seconds: Option<u32>,
    /// A manual retry is in flight.
    pub retrying: bool,
    /// No automatic retries remain.
    pub exhausted: bool,
    pub retry_attempt: u32,
    pub max_retries: u32,
    /// Service boundary only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<HealthStatus>,
    /// Page boundary only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<DetailsPanel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary: Option<String>,
}

impl RecoverySurface {
    /// Builds a surface with no countdown, health badge or details panel.
    pub fn new(metadata: &ErrorMetadata, actions: &[RecoveryAction]) -> Self {
        let status_indicator = metadata
            .status_code
            .map(|code| code.to_string())
            .unwrap_or_else(|| metadata.kind.as_str().to_uppercase());

        Self {
            status_indicator,
            kind: metadata.kind,
            severity: metadata.severity,
            title: metadata.title().to_string(),
            description: metadata.description().to_string(),
            actions: actions.iter().map(SurfaceAction::from).collect(),
            countdown_seconds: None,
            retrying: false,
            exhausted: false,
            retry_attempt: 0,
            max_retries: 0,
            health: None,
            details: None,
            boundary: None,
        }
    }

    pub fn primary_action(&self) -> Option<&SurfaceAction> {
        self.actions.iter().find(|action| action.is_primary)
    }

    pub fn has_action(&self, action_type: RecoveryActionType) -> bool {
        self.actions
            .iter()
            .any(|action| action.action_type == action_type)
    }
}

/// Diagnostic lines for the details panel.
pub fn detail_lines(failure: &Failure, metadata: &ErrorMetadata) -> Vec<String> {
    let mut lines = vec![format!("message: {}", failure.message())];
    if let Some(type_name) = failure.type_name() {
        lines.push(format!("type: {}", type_name));
    }
    if let Some(status) = metadata.status_code {
        lines.push(format!("status: {}", status));
    }
    lines.push(format!("kind: {} ({})", metadata.kind, metadata.severity));
    if let Some(endpoint) = metadata.endpoint() {
        lines.push(format!("endpoint: {}", endpoint));
    }
    if let Some(request_id) = metadata.request_id() {
        lines.push(format!("request id: {}", request_id));
    }
    lines.push(format!("time: {}", metadata.timestamp.to_rfc3339()));
    lines
}
