//! Recovery planning: which actions to offer for a given kind.

use std::collections::HashMap;

use serde::Deserialize;

use super::{ActionHandler, RecoveryAction, RecoveryActionType};
use crate::error::ErrorKind;

/// Destinations the host application makes available to recovery actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RecoveryUrls {
    pub home: Option<String>,
    pub login: Option<String>,
    pub contact: Option<String>,
    pub status_page: Option<String>,
}

impl RecoveryUrls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_home(mut self, url: impl Into<String>) -> Self {
        self.home = Some(url.into());
        self
    }

    pub fn with_login(mut self, url: impl Into<String>) -> Self {
        self.login = Some(url.into());
        self
    }

    pub fn with_contact(mut self, url: impl Into<String>) -> Self {
        self.contact = Some(url.into());
        self
    }

    pub fn with_status_page(mut self, url: impl Into<String>) -> Self {
        self.status_page = Some(url.into());
        self
    }

    /// The destination an action type navigates to, if configured.
    pub fn destination(&self, action_type: RecoveryActionType) -> Option<&str> {
        match action_type {
            RecoveryActionType::GoHome => self.home.as_deref(),
            RecoveryActionType::Login => self.login.as_deref(),
            RecoveryActionType::ContactSupport => self.contact.as_deref(),
            RecoveryActionType::ViewStatus => self.status_page.as_deref(),
            RecoveryActionType::GoBack
            | RecoveryActionType::Retry
            | RecoveryActionType::Refresh => None,
        }
    }
}

/// Candidate actions for a kind, most helpful first.
pub fn candidates(kind: ErrorKind) -> &'static [RecoveryActionType] {
    use RecoveryActionType::*;
    match kind {
        ErrorKind::NotFound => &[GoHome, GoBack],
        ErrorKind::Unauthorized => &[Login, GoHome],
        ErrorKind::Forbidden => &[ContactSupport, GoHome],
        ErrorKind::ServerError => &[Retry, GoHome, ContactSupport],
        ErrorKind::ServiceUnavailable => &[Retry, ViewStatus],
        ErrorKind::Timeout => &[Retry, Refresh],
        ErrorKind::Gone => &[GoHome, GoBack],
        ErrorKind::BadRequest => &[GoHome],
        ErrorKind::Maintenance => &[ViewStatus],
        ErrorKind::Unknown => &[GoHome, ContactSupport],
    }
}

/// Plans the ordered recovery actions for `kind` given the configured URLs.
///
/// Actions that need a destination are dropped when it is missing. The first
/// remaining action is the primary one.
pub fn plan(kind: ErrorKind, urls: &RecoveryUrls) -> Vec<RecoveryAction> {
    RecoveryPlanner::new(urls.clone()).plan(kind)
}

/// Planner holding the URLs and any custom action handlers.
#[derive(Clone, Default)]
pub struct RecoveryPlanner {
    urls: RecoveryUrls,
    handlers: HashMap<RecoveryActionType, ActionHandler>,
}

impl RecoveryPlanner {
    pub fn new(urls: RecoveryUrls) -> Self {
        Self {
            urls,
            handlers: HashMap::new(),
        }
    }

    /// Registers a handler used when the action has no destination URL.
    ///
    /// A registered handler also makes a destination-less action eligible.
    pub fn with_handler(mut self, action_type: RecoveryActionType, handler: ActionHandler) -> Self {
        self.handlers.insert(action_type, handler);
        self
    }

    pub fn urls(&self) -> &RecoveryUrls {
        &self.urls
    }

    pub fn plan(&self, kind: ErrorKind) -> Vec<RecoveryAction> {
        let mut actions: Vec<RecoveryAction> = candidates(kind)
            .iter()
            .filter_map(|&action_type| self.build(action_type))
            .collect();

        if let Some(first) = actions.first_mut() {
            first.is_primary = true;
        }
        actions
    }

    fn build(&self, action_type: RecoveryActionType) -> Option<RecoveryAction> {
        let destination = self.urls.destination(action_type);
        let handler = self.handlers.get(&action_type).cloned();

        if !action_type.is_intrinsic() && destination.is_none() && handler.is_none() {
            return None;
        }

        let mut action = RecoveryAction::new(action_type);
        action.destination_url = destination.map(str::to_string);
        action.handler = handler;
        Some(action)
    }
}

impl std::fmt::Debug for RecoveryPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut handlers: Vec<_> = self.handlers.keys().map(|k| k.as_str()).collect();
        handlers.sort_unstable();
        f.debug_struct("RecoveryPlanner")
            .field("urls", &self.urls)
            .field("handlers", &handlers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn all_urls() -> RecoveryUrls {
        RecoveryUrls::new()
            .with_home("/")
            .with_login("/login")
            .with_contact("/support")
            .with_status_page("/status")
    }

    fn types(actions: &[RecoveryAction]) -> Vec<RecoveryActionType> {
        actions.iter().map(|a| a.action_type).collect()
    }

    #[test]
    fn test_full_plan_per_kind() {
        use RecoveryActionType::*;
        let urls = all_urls();
        let expected = [
            (ErrorKind::NotFound, vec![GoHome, GoBack]),
            (ErrorKind::Unauthorized, vec![Login, GoHome]),
            (ErrorKind::Forbidden, vec![ContactSupport, GoHome]),
            (ErrorKind::ServerError, vec![Retry, GoHome, ContactSupport]),
            (ErrorKind::ServiceUnavailable, vec![Retry, ViewStatus]),
            (ErrorKind::Timeout, vec![Retry, Refresh]),
            (ErrorKind::Gone, vec![GoHome, GoBack]),
            (ErrorKind::BadRequest, vec![GoHome]),
            (ErrorKind::Maintenance, vec![ViewStatus]),
            (ErrorKind::Unknown, vec![GoHome, ContactSupport]),
        ];
        for (kind, order) in expected {
            assert_eq!(types(&plan(kind, &urls)), order, "kind {}", kind);
        }
    }

    #[test]
    fn test_missing_destinations_are_dropped() {
        let urls = RecoveryUrls::new();
        for kind in ErrorKind::ALL {
            for action in plan(kind, &urls) {
                assert!(
                    action.action_type.is_intrinsic(),
                    "{} offered {} without a destination",
                    kind,
                    action.action_type
                );
            }
        }
    }

    #[test]
    fn test_unauthorized_without_login_url() {
        let urls = RecoveryUrls::new().with_home("/");
        let actions = plan(ErrorKind::Unauthorized, &urls);
        assert_eq!(types(&actions), vec![RecoveryActionType::GoHome]);
        assert!(actions[0].is_primary);
    }

    #[test]
    fn test_exactly_one_primary_and_it_is_first() {
        let urls = all_urls();
        for kind in ErrorKind::ALL {
            let actions = plan(kind, &urls);
            assert!(actions[0].is_primary);
            assert_eq!(actions.iter().filter(|a| a.is_primary).count(), 1);
        }
    }

    #[test]
    fn test_empty_plan_has_no_primary() {
        let actions = plan(ErrorKind::Maintenance, &RecoveryUrls::new());
        assert!(actions.is_empty());
    }

    #[test]
    fn test_destinations_attached() {
        let actions = plan(ErrorKind::ServerError, &all_urls());
        assert_eq!(actions[0].destination_url, None);
        assert_eq!(actions[1].destination_url.as_deref(), Some("/"));
        assert_eq!(actions[2].destination_url.as_deref(), Some("/support"));
    }

    #[test]
    fn test_handler_makes_action_eligible() {
        let planner = RecoveryPlanner::new(RecoveryUrls::new())
            .with_handler(RecoveryActionType::ContactSupport, Arc::new(|| {}));
        let actions = planner.plan(ErrorKind::Forbidden);

        assert_eq!(types(&actions), vec![RecoveryActionType::ContactSupport]);
        assert!(actions[0].handler.is_some());
        assert!(actions[0].destination_url.is_none());
    }

    #[test]
    fn test_scenario_not_found_with_home_only() {
        let actions = plan(ErrorKind::NotFound, &RecoveryUrls::new().with_home("/"));
        assert_eq!(
            types(&actions),
            vec![RecoveryActionType::GoHome, RecoveryActionType::GoBack]
        );
        assert!(actions[0].is_primary);
        assert!(!actions[1].is_primary);
    }
}
