//! Automatic retry for retryable failures.
//!
//! This module provides the [`RetryController`] state machine, the delay
//! policies it draws from, and the owned timer tasks that drive its
//! countdown.

pub mod controller;
pub mod policy;
pub mod timer;

pub use controller::{RetryController, RetryEmitter, RetryOutcome};
pub use policy::{countdown_seconds, RetryPolicy};
pub use timer::ScopedTask;

/// State of the retry controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPhase {
    /// No automatic retry is scheduled.
    #[default]
    Idle,
    /// A countdown is running.
    CountingDown { remaining_seconds: u32 },
    /// The attempt budget is spent; only manual recovery remains.
    Exhausted,
}

/// Events emitted by the countdown timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryEvent {
    /// One second elapsed; `remaining` seconds are left.
    Tick { generation: u64, remaining: u32 },
    /// The full delay elapsed.
    Expired { generation: u64 },
}

impl RetryEvent {
    pub fn generation(&self) -> u64 {
        match *self {
            RetryEvent::Tick { generation, .. } | RetryEvent::Expired { generation } => generation,
        }
    }
}
