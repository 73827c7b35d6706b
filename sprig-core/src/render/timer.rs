//! Timers
//!
//! Timeouts and intervals run as tokio tasks on the current
//! [`LocalSet`](tokio::task::LocalSet). Creating one outside a `LocalSet`
//! panics, as any `spawn_local` does.
//!
//! Timers created through [`Ctx::timeout`](super::Ctx::timeout) and
//! [`Ctx::interval`](super::Ctx::interval) are cancelled when that context
//! next clears.

use std::rc::Rc;
use std::time::Duration;

use tokio::task::AbortHandle;
use tokio::time::Instant;

use crate::reactive::Cleanup;

/// Shortest interval period. `tokio` rejects a zero period.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Handle to a running timeout or interval.
#[derive(Clone, Debug)]
pub struct Timer {
    handle: Rc<AbortHandle>,
}

impl Timer {
    /// Run `callback` once after `delay`.
    pub fn timeout<F>(delay: Duration, callback: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        let task = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
        Self {
            handle: Rc::new(task.abort_handle()),
        }
    }

    /// Run `callback` every `period`, starting one period from now.
    ///
    /// Periods shorter than [`MIN_INTERVAL`] are raised to it.
    pub fn interval<F>(period: Duration, mut callback: F) -> Self
    where
        F: FnMut() + 'static,
    {
        let period = period.max(MIN_INTERVAL);
        let task = tokio::task::spawn_local(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                callback();
            }
        });
        Self {
            handle: Rc::new(task.abort_handle()),
        }
    }

    /// Stop the timer. Cancelling twice, or after a timeout fired, is harmless.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Whether the timer fired for the last time or was cancelled.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub(crate) fn canceller(&self) -> Cleanup {
        let handle = Rc::clone(&self.handle);
        Box::new(move || handle.abort())
    }
}
