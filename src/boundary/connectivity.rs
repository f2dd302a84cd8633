//! Network connectivity tracking for the service boundary.
//!
//! The boundary learns about connectivity two ways: the platform pushes
//! online/offline signals through a [`ConnectivityHandle`], and a periodic
//! poll asks a [`Connectivity`] probe. Both only feed the displayed
//! [`HealthStatus`]; neither changes retry policy.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;

use super::BoundaryEvent;
use crate::error::{ErrorKind, ErrorMetadata, Severity};

/// Answers whether the network is reachable.
pub trait Connectivity: Send + Sync {
    fn is_online(&self) -> bool;
}

/// A probe that always reports online.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeOnline;

impl Connectivity for AssumeOnline {
    fn is_online(&self) -> bool {
        true
    }
}

/// A probe backed by a shared flag that the host flips.
#[derive(Debug, Clone)]
pub struct ConnectivityFlag {
    online: Arc<AtomicBool>,
}

impl Default for ConnectivityFlag {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ConnectivityFlag {
    pub fn new(online: bool) -> Self {
        Self {
            online: Arc::new(AtomicBool::new(online)),
        }
    }

    pub fn set(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

impl Connectivity for ConnectivityFlag {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}

/// Sends platform online/offline signals to a mounted boundary.
#[derive(Debug, Clone)]
pub struct ConnectivityHandle {
    sender: mpsc::UnboundedSender<BoundaryEvent>,
}

impl ConnectivityHandle {
    pub(crate) fn new(sender: mpsc::UnboundedSender<BoundaryEvent>) -> Self {
        Self { sender }
    }

    /// Reports the current connectivity. Returns false once the boundary
    /// is gone.
    pub fn set_online(&self, online: bool) -> bool {
        self.sender.send(BoundaryEvent::Connectivity(online)).is_ok()
    }
}

/// Coarse health shown by the service boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
    Offline,
    Maintenance,
}

impl HealthStatus {
    /// Derives the health from connectivity and the current failure.
    pub fn derive(online: bool, metadata: Option<&ErrorMetadata>) -> Self {
        if !online {
            return HealthStatus::Offline;
        }
        match metadata {
            None => HealthStatus::Healthy,
            Some(metadata) if metadata.kind == ErrorKind::Maintenance => HealthStatus::Maintenance,
            Some(metadata) if metadata.severity >= Severity::Critical => HealthStatus::Unhealthy,
            Some(_) => HealthStatus::Degraded,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::Degraded => "Degraded",
            HealthStatus::Unhealthy => "Unhealthy",
            HealthStatus::Offline => "Offline",
            HealthStatus::Maintenance => "Maintenance",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
