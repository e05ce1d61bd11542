//! Countdown primitive: blocks until a deadline or until the owning timer is
//! asked to stop, whichever comes first.
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::core::WaitOutcome;
use crate::infra::latch::Latch;

/// Countdown bound to a `running` flag and a "finished waiting" latch.
///
/// The deadline is computed once at entry (`now + duration`); spurious wakeups
/// and scheduling delays cannot push it further. When the wait ends, the
/// `finished` latch is raised so the consumer can rendezvous on it.
#[derive(Debug, Clone, Copy)]
pub struct Clock<'a> {
    running: &'a AtomicBool,
    finished: &'a Latch,
}

impl<'a> Clock<'a> {
    pub fn new(running: &'a AtomicBool, finished: &'a Latch) -> Self {
        Self { running, finished }
    }

    /// Wait out `duration` unless `running` turns false first.
    ///
    /// A zero duration elapses immediately. A duration too large to be
    /// represented as an [`Instant`] only ends on cancellation.
    ///
    /// The canceller must store `running = false` and then call
    /// [`Latch::wake`] on the `finished` latch.
    pub fn wait(&self, duration: Duration) -> WaitOutcome {
        let deadline = Instant::now().checked_add(duration);
        self.finished.reset();

        let outcome = self
            .finished
            .park_until(deadline, || !self.running.load(Ordering::Acquire));

        self.finished.set();
        outcome
    }
}
