//! The boundary shell.
//!
//! A [`Boundary`] guards a child render. While the child succeeds its output
//! passes through untouched; when it fails the boundary classifies the
//! failure, plans recovery actions, optionally arms an automatic retry, and
//! renders either a caller-supplied fallback or the built-in
//! [`RecoverySurface`](crate::surface::RecoverySurface).
//!
//! All timers report into one event queue owned by the boundary, which is
//! the single writer of its [`BoundaryState`]. Drive it with
//! [`Boundary::next_event`] or [`Boundary::drain_ready`].

pub mod config;
pub mod connectivity;
pub mod hooks;
pub mod navigation;
pub mod shell;
pub mod state;

pub use config::{BoundaryConfig, BoundaryVariant, ConfigError};
pub use connectivity::{
    AssumeOnline, Connectivity, ConnectivityFlag, ConnectivityHandle, HealthStatus,
};
pub use hooks::{AnalyticsEvent, AnalyticsEventType, Hooks, RenderInfo};
pub use navigation::{Detached, Navigation, NavigationLog, Platform, Router};
pub use shell::{
    Boundary, BoundaryBuilder, BoundaryUpdate, DispatchOutcome, FallbackProps,
    FallbackRenderer, Guarded, Rendered, ResetHandle, LAST_RESORT_MESSAGE,
};
pub use state::BoundaryState;

use crate::retry::RetryEvent;

/// Messages delivered to a boundary's event queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BoundaryEvent {
    /// From the retry countdown.
    Retry(RetryEvent),
    /// The optimistic window of a manual retry elapsed.
    ManualRetryElapsed { generation: u64 },
    /// A fallback asked for a reset.
    Reset,
    /// Platform signal or poll result.
    Connectivity(bool),
}
