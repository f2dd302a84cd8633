//! Owned timer tasks.
//!
//! Every timer the boundary starts is a [`ScopedTask`]: a spawned tokio task
//! that is aborted when the handle is dropped. Dropping the handle is the
//! only way to cancel, so reset, unmount and a superseding failure all
//! cancel by replacing or clearing the field that owns it.

use std::future::Future;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep_until, Instant, MissedTickBehavior};
use tracing::warn;

use super::RetryEvent;

/// Countdown tick period.
pub const TICK: Duration = Duration::from_secs(1);

/// A spawned task that is aborted on drop.
#[derive(Debug)]
pub struct ScopedTask {
    handle: JoinHandle<()>,
}

impl ScopedTask {
    /// Spawns `future` on the current tokio runtime.
    ///
    /// Returns `None` when called outside a runtime.
    pub fn spawn<F>(future: F) -> Option<Self>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match Handle::try_current() {
            Ok(runtime) => Some(Self {
                handle: runtime.spawn(future),
            }),
            Err(_) => {
                warn!("no tokio runtime available; timer not started");
                None
            }
        }
    }

    /// Returns true while the task has not completed or been aborted.
    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for ScopedTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Runs `fire` once after `delay`.
pub fn after<F>(delay: Duration, fire: F) -> Option<ScopedTask>
where
    F: FnOnce() + Send + 'static,
{
    ScopedTask::spawn(async move {
        tokio::time::sleep(delay).await;
        fire();
    })
}

/// Runs `tick` every `period`, starting one period from now, until it
/// returns false.
pub fn every<F>(period: Duration, mut tick: F) -> Option<ScopedTask>
where
    F: FnMut() -> bool + Send + 'static,
{
    ScopedTask::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if !tick() {
                break;
            }
        }
    })
}

/// Starts the countdown pair for one retry cycle.
///
/// A one-second interval emits [`RetryEvent::Tick`] with the remaining
/// seconds, and a one-shot emits [`RetryEvent::Expired`] after `delay`. Both
/// run in one task so dropping the handle cancels both. The one-shot wins
/// when both are due at the same instant and reports the final zero tick
/// itself, so the countdown always reaches 0 before expiry.
pub fn countdown<F>(generation: u64, delay: Duration, seconds: u32, emit: F) -> Option<ScopedTask>
where
    F: Fn(RetryEvent) -> bool + Send + 'static,
{
    ScopedTask::spawn(async move {
        let start = Instant::now();
        let deadline = sleep_until(start + delay);
        tokio::pin!(deadline);
        let mut ticker = interval_at(start + TICK, TICK);
        let mut remaining = seconds;

        loop {
            tokio::select! {
                biased;
                _ = &mut deadline => {
                    if remaining > 0 {
                        emit(RetryEvent::Tick { generation, remaining: 0 });
                    }
                    emit(RetryEvent::Expired { generation });
                    break;
                }
                _ = ticker.tick(), if remaining > 0 => {
                    remaining -= 1;
                    if !emit(RetryEvent::Tick { generation, remaining }) {
                        break;
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    #[tokio::test(start_paused = true)]
    async fn test_countdown_event_sequence() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let _task = countdown(7, Duration::from_millis(3000), 3, move |event| {
            sink.lock().unwrap().push(event);
            true
        })
        .unwrap();

        tokio::time::sleep(Duration::from_millis(3500)).await;

        let events = events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                RetryEvent::Tick {
                    generation: 7,
                    remaining: 2
                },
                RetryEvent::Tick {
                    generation: 7,
                    remaining: 1
                },
                RetryEvent::Tick {
                    generation: 7,
                    remaining: 0
                },
                RetryEvent::Expired { generation: 7 },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_countdown_cancels_it() {
        let count = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&count);
        let task = countdown(1, Duration::from_millis(3000), 3, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        })
        .unwrap();

        tokio::time::sleep(Duration::from_millis(1500)).await;
        drop(task);
        tokio::time::sleep(Duration::from_millis(5000)).await;

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_after_fires_once() {
        let count = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&count);
        let task = after(Duration::from_millis(500), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        assert!(task.is_active());
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!task.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_stops_when_tick_returns_false() {
        let count = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&count);
        let _task = every(Duration::from_secs(1), move || {
            counter.fetch_add(1, Ordering::SeqCst) < 2
        })
        .unwrap();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_spawn_outside_runtime_returns_none() {
        assert!(ScopedTask::spawn(async {}).is_none());
    }
}
