//! Automatic retry state machine.
//!
//! The controller moves between [`RetryPhase::Idle`],
//! [`RetryPhase::CountingDown`] and [`RetryPhase::Exhausted`]. It owns the
//! countdown timer; the timer reports back through an emitter supplied by
//! the owner, and the owner feeds those events into
//! [`RetryController::on_event`]. Each countdown has a generation so events
//! still in flight after a cancellation are ignored.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::policy::countdown_seconds;
use super::timer::{self, ScopedTask};
use super::{RetryEvent, RetryPhase, RetryPolicy};

/// Callback the countdown uses to report events. Returns false once the
/// receiving side is gone.
pub type RetryEmitter = Arc<dyn Fn(RetryEvent) -> bool + Send + Sync>;

/// Result of feeding a timer event to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOutcome {
    /// The countdown moved to `remaining_seconds`.
    Ticked { remaining_seconds: u32 },
    /// The delay elapsed: the owner must clear its failure and re-render.
    Fired { attempt: u32 },
    /// The event belonged to a cancelled countdown.
    Stale,
}

/// Timer-driven automatic retry with a bounded attempt count.
pub struct RetryController {
    policy: RetryPolicy,
    max_retries: u32,
    attempt: u32,
    phase: RetryPhase,
    generation: u64,
    timer: Option<ScopedTask>,
    emit: RetryEmitter,
}

impl RetryController {
    pub fn new(policy: RetryPolicy, max_retries: u32, emit: RetryEmitter) -> Self {
        Self {
            policy,
            max_retries,
            attempt: 0,
            phase: RetryPhase::Idle,
            generation: 0,
            timer: None,
            emit,
        }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Completed retry attempts since the last successful recovery.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn phase(&self) -> RetryPhase {
        self.phase
    }

    /// Identifier of the current countdown; bumped on every arm and cancel.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn remaining_seconds(&self) -> u32 {
        match self.phase {
            RetryPhase::CountingDown { remaining_seconds } => remaining_seconds,
            _ => 0,
        }
    }

    pub fn is_counting_down(&self) -> bool {
        matches!(self.phase, RetryPhase::CountingDown { .. })
    }

    /// Returns true while a countdown task is owned and still running.
    pub fn has_pending_timer(&self) -> bool {
        self.timer.as_ref().is_some_and(ScopedTask::is_active)
    }

    /// Whether another automatic attempt is allowed.
    pub fn attempts_remain(&self) -> bool {
        self.attempt < self.max_retries
    }

    /// Reacts to a newly caught failure.
    ///
    /// Any running countdown is cancelled first. A countdown starts only
    /// when `auto_retry` is on, the failure is retryable and attempts
    /// remain; with no attempts left the controller is exhausted.
    pub fn arm(&mut self, retryable: bool, auto_retry: bool) -> RetryPhase {
        self.cancel();

        if !auto_retry || !retryable {
            self.phase = RetryPhase::Idle;
            return self.phase;
        }

        if !self.attempts_remain() {
            info!(
                attempt = self.attempt,
                max_retries = self.max_retries,
                "automatic retries exhausted"
            );
            self.phase = RetryPhase::Exhausted;
            return self.phase;
        }

        let delay = self.policy.delay_for(self.attempt);
        let seconds = countdown_seconds(delay);
        self.generation += 1;

        let emit = Arc::clone(&self.emit);
        match timer::countdown(self.generation, delay, seconds, move |event| emit(event)) {
            Some(task) => {
                debug!(
                    generation = self.generation,
                    delay_ms = delay.as_millis() as u64,
                    seconds,
                    "retry countdown started"
                );
                self.timer = Some(task);
                self.phase = RetryPhase::CountingDown {
                    remaining_seconds: seconds,
                };
            }
            None => {
                warn!("retry countdown unavailable; falling back to manual retry");
                self.phase = RetryPhase::Idle;
            }
        }
        self.phase
    }

    /// Applies a timer event.
    pub fn on_event(&mut self, event: RetryEvent) -> RetryOutcome {
        let RetryPhase::CountingDown { remaining_seconds } = self.phase else {
            return RetryOutcome::Stale;
        };
        if event.generation() != self.generation {
            return RetryOutcome::Stale;
        }

        match event {
            RetryEvent::Tick { remaining, .. } => {
                let remaining_seconds = remaining.min(remaining_seconds);
                self.phase = RetryPhase::CountingDown { remaining_seconds };
                RetryOutcome::Ticked { remaining_seconds }
            }
            RetryEvent::Expired { .. } => {
                self.timer = None;
                self.bump_attempt();
                self.phase = RetryPhase::Idle;
                info!(attempt = self.attempt, "automatic retry fired");
                RetryOutcome::Fired {
                    attempt: self.attempt,
                }
            }
        }
    }

    /// A user-initiated retry: cancels any countdown and counts an attempt.
    pub fn manual_retry(&mut self) -> u32 {
        self.cancel();
        self.bump_attempt();
        self.attempt
    }

    /// Cancels the countdown, if any, and returns to idle.
    ///
    /// Exhaustion is kept: it is a property of the attempt count, which a
    /// cancel does not change.
    pub fn cancel(&mut self) {
        if self.timer.take().is_some() {
            debug!(generation = self.generation, "retry countdown cancelled");
        }
        self.generation += 1;
        if self.is_counting_down() {
            self.phase = RetryPhase::Idle;
        }
    }

    /// The guarded child rendered again: the attempt count starts over.
    pub fn mark_recovered(&mut self) {
        self.cancel();
        self.attempt = 0;
        self.phase = RetryPhase::Idle;
    }

    fn bump_attempt(&mut self) {
        self.attempt = self.attempt.saturating_add(1).min(self.max_retries);
    }
}

impl std::fmt::Debug for RetryController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryController")
            .field("policy", &self.policy)
            .field("max_retries", &self.max_retries)
            .field("attempt", &self.attempt)
            .field("phase", &self.phase)
            .field("generation", &self.generation)
            .field("timer", &self.timer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn controller(max_retries: u32) -> (RetryController, mpsc::UnboundedReceiver<RetryEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let emit: RetryEmitter = Arc::new(move |event| tx.send(event).is_ok());
        let policy = RetryPolicy::fixed(Duration::from_millis(3000));
        (RetryController::new(policy, max_retries, emit), rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_countdown_fires() {
        let (mut retry, mut rx) = controller(3);
        assert_eq!(
            retry.arm(true, true),
            RetryPhase::CountingDown {
                remaining_seconds: 3
            }
        );

        let mut seen = vec![retry.remaining_seconds()];
        loop {
            let event = rx.recv().await.unwrap();
            match retry.on_event(event) {
                RetryOutcome::Ticked { remaining_seconds } => seen.push(remaining_seconds),
                RetryOutcome::Fired { attempt } => {
                    assert_eq!(attempt, 1);
                    break;
                }
                RetryOutcome::Stale => panic!("unexpected stale event"),
            }
        }

        assert_eq!(seen, vec![3, 2, 1, 0]);
        assert_eq!(retry.phase(), RetryPhase::Idle);
        assert_eq!(retry.attempt(), 1);
        assert!(!retry.has_pending_timer());
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_armed_when_disabled_or_not_retryable() {
        let (mut retry, _rx) = controller(3);
        assert_eq!(retry.arm(true, false), RetryPhase::Idle);
        assert_eq!(retry.arm(false, true), RetryPhase::Idle);
        assert!(!retry.has_pending_timer());
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_after_max_attempts() {
        let (mut retry, _rx) = controller(2);
        retry.manual_retry();
        retry.manual_retry();
        assert_eq!(retry.attempt(), 2);
        assert_eq!(retry.arm(true, true), RetryPhase::Exhausted);
        assert!(!retry.has_pending_timer());
        // Idempotent.
        assert_eq!(retry.arm(true, true), RetryPhase::Exhausted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_attempt_saturates_at_max() {
        let (mut retry, _rx) = controller(1);
        assert_eq!(retry.manual_retry(), 1);
        assert_eq!(retry.manual_retry(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_makes_pending_events_stale() {
        let (mut retry, mut rx) = controller(3);
        retry.arm(true, true);

        let first = rx.recv().await.unwrap();
        assert_eq!(
            retry.on_event(first),
            RetryOutcome::Ticked {
                remaining_seconds: 2
            }
        );

        retry.cancel();
        assert_eq!(retry.phase(), RetryPhase::Idle);
        assert_eq!(retry.on_event(first), RetryOutcome::Stale);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(retry.attempt(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_supersedes_previous_countdown() {
        let (mut retry, mut rx) = controller(3);
        retry.arm(true, true);
        let old = RetryEvent::Expired {
            generation: retry.generation(),
        };
        retry.arm(true, true);

        assert_eq!(retry.on_event(old), RetryOutcome::Stale);
        let event = rx.recv().await.unwrap();
        assert_eq!(event.generation(), retry.generation());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mark_recovered_resets_attempts() {
        let (mut retry, _rx) = controller(3);
        retry.manual_retry();
        retry.mark_recovered();
        assert_eq!(retry.attempt(), 0);
        assert!(retry.attempts_remain());
    }

    #[test]
    fn test_arm_outside_runtime_stays_idle() {
        let (mut retry, _rx) = controller(3);
        assert_eq!(retry.arm(true, true), RetryPhase::Idle);
    }
}
