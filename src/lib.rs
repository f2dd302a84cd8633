//! recoverykit - error recovery boundaries
//!
//! A boundary guards a render, classifies whatever fails inside it, offers
//! ordered recovery actions and optionally retries on a countdown. The
//! building blocks are usable on their own:
//!
//! - [`error`]: failure classification
//! - [`recovery`]: recovery action planning
//! - [`retry`]: the automatic retry state machine and its timers
//! - [`boundary`]: the page and service boundaries that tie them together
//! - [`surface`]: the built-in recovery view and its terminal renderer

pub mod boundary;
pub mod error;
pub mod logging;
pub mod recovery;
pub mod retry;
pub mod surface;

pub use boundary::{Boundary, BoundaryConfig, BoundaryState, BoundaryVariant, Rendered};
pub use error::{ErrorClassifier, ErrorKind, ErrorMetadata, Failure, Severity};
pub use recovery::{RecoveryAction, RecoveryActionType};
