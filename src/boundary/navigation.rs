//! Seams between the boundary and the host application.
//!
//! Recovery actions leave the boundary through two traits: [`Router`] for
//! in-app navigation and [`Platform`] for page-level primitives (full reload,
//! document title).

use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

/// In-app navigation.
pub trait Router: Send + Sync {
    /// Navigates to `url`.
    fn push(&self, url: &str);
    /// Navigates one step back in history.
    fn back(&self);
}

/// Page-level primitives of the hosting platform.
pub trait Platform: Send + Sync {
    /// Reloads the current page in place.
    fn reload(&self);
    /// Sets the document title.
    fn set_title(&self, _title: &str) {}
}

/// Router and platform that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl Router for Detached {
    fn push(&self, _url: &str) {}
    fn back(&self) {}
}

impl Platform for Detached {
    fn reload(&self) {}
}

/// One navigation performed on behalf of a recovery action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Push(String),
    Back,
    Reload,
    Title(String),
}

/// Router and platform that record every call, and log it.
///
/// Cloning shares the log.
#[derive(Debug, Clone, Default)]
pub struct NavigationLog {
    entries: Arc<Mutex<Vec<Navigation>>>,
}

impl NavigationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every navigation so far, oldest first.
    pub fn entries(&self) -> Vec<Navigation> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<Navigation> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    fn record(&self, navigation: Navigation) {
        info!(?navigation, "navigation");
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(navigation);
    }
}

impl Router for NavigationLog {
    fn push(&self, url: &str) {
        self.record(Navigation::Push(url.to_string()));
    }

    fn back(&self) {
        self.record(Navigation::Back);
    }
}

impl Platform for NavigationLog {
    fn reload(&self) {
        self.record(Navigation::Reload);
    }

    fn set_title(&self, title: &str) {
        self.record(Navigation::Title(title.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_records_in_order() {
        let log = NavigationLog::new();
        log.push("/login");
        log.back();
        log.reload();
        log.set_title("404 - Page Not Found");

        assert_eq!(
            log.entries(),
            vec![
                Navigation::Push("/login".to_string()),
                Navigation::Back,
                Navigation::Reload,
                Navigation::Title("404 - Page Not Found".to_string()),
            ]
        );
    }

    #[test]
    fn test_clones_share_entries() {
        let log = NavigationLog::new();
        let router: Arc<dyn Router> = Arc::new(log.clone());
        router.push("/");
        assert_eq!(log.last(), Some(Navigation::Push("/".to_string())));
    }

    #[test]
    fn test_detached_is_inert() {
        let detached = Detached;
        Router::push(&detached, "/");
        Router::back(&detached);
        Platform::reload(&detached);
        Platform::set_title(&detached, "x");
    }
}
