//! Recovery action types.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Custom callback attached to a recovery action.
pub type ActionHandler = Arc<dyn Fn() + Send + Sync>;

/// What a recovery action does when invoked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecoveryActionType {
    GoHome,
    GoBack,
    Retry,
    Refresh,
    Login,
    ContactSupport,
    ViewStatus,
}

impl RecoveryActionType {
    /// Intrinsic actions need no configured destination.
    pub fn is_intrinsic(self) -> bool {
        matches!(
            self,
            RecoveryActionType::Retry | RecoveryActionType::Refresh | RecoveryActionType::GoBack
        )
    }

    /// Default button label.
    pub fn label(self) -> &'static str {
        match self {
            RecoveryActionType::GoHome => "Go home",
            RecoveryActionType::GoBack => "Go back",
            RecoveryActionType::Retry => "Try again",
            RecoveryActionType::Refresh => "Refresh page",
            RecoveryActionType::Login => "Sign in",
            RecoveryActionType::ContactSupport => "Contact support",
            RecoveryActionType::ViewStatus => "View status page",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecoveryActionType::GoHome => "go-home",
            RecoveryActionType::GoBack => "go-back",
            RecoveryActionType::Retry => "retry",
            RecoveryActionType::Refresh => "refresh",
            RecoveryActionType::Login => "login",
            RecoveryActionType::ContactSupport => "contact-support",
            RecoveryActionType::ViewStatus => "view-status",
        }
    }
}

impl fmt::Display for RecoveryActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-facing remedy offered on the recovery surface.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryAction {
    pub action_type: RecoveryActionType,
    pub label: String,
    pub is_primary: bool,
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_url: Option<String>,
    #[serde(skip)]
    pub handler: Option<ActionHandler>,
}

impl RecoveryAction {
    /// Creates a non-primary, enabled action with the default label.
    pub fn new(action_type: RecoveryActionType) -> Self {
        Self {
            action_type,
            label: action_type.label().to_string(),
            is_primary: false,
            disabled: false,
            destination_url: None,
            handler: None,
        }
    }

    pub fn with_destination(mut self, url: impl Into<String>) -> Self {
        self.destination_url = Some(url.into());
        self
    }

    pub fn with_handler(mut self, handler: ActionHandler) -> Self {
        self.handler = Some(handler);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }
}

impl fmt::Debug for RecoveryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoveryAction")
            .field("action_type", &self.action_type)
            .field("label", &self.label)
            .field("is_primary", &self.is_primary)
            .field("disabled", &self.disabled)
            .field("destination_url", &self.destination_url)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

impl PartialEq for RecoveryAction {
    fn eq(&self, other: &Self) -> bool {
        self.action_type == other.action_type
            && self.label == other.label
            && self.is_primary == other.is_primary
            && self.disabled == other.disabled
            && self.destination_url == other.destination_url
            && self.handler.is_some() == other.handler.is_some()
    }
}
