//! Failure classification for the recovery boundary.
//!
//! A guarded child raises a [`Failure`]; the [`ErrorClassifier`] maps it onto
//! the closed [`ErrorKind`] taxonomy and derives retryability and severity.

pub mod classification;
pub mod classifier;
pub mod detector;
pub mod failure;

// Re-export main types for convenient access
pub use classification::{ErrorKind, ErrorMetadata, Severity};
pub use classifier::{ErrorClassifier, StatusOverrides};
pub use detector::{KindPattern, MessageDetector};
pub use failure::Failure;
