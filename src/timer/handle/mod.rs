//! Deferred result of one timer activation.
//!
//! The run loop publishes exactly one outcome into an
//! [`embassy_sync::signal::Signal`] and raises a latch. The handle can be
//! `.await`ed (the signal drives the waker) or blocked on from a plain thread
//! (the latch parks the caller).
use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use std::sync::Arc;
use std::time::{Duration, Instant};

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};

use crate::error::{TimerError, TimerResult};
use crate::infra::latch::Latch;

//==================================================================================COMPLETION
/// Slot shared by the handle and the run loop.
struct Completion<R> {
    signal: Signal<CriticalSectionRawMutex, TimerResult<R>>,
    done: Latch,
}

impl<R: Send> Completion<R> {
    fn publish(&self, outcome: TimerResult<R>) {
        self.signal.signal(outcome);
        self.done.set();
    }
}

/// Build a connected handle/publisher pair.
pub(crate) fn channel<R: Send>() -> (TimerHandle<R>, Publisher<R>) {
    let completion = Arc::new(Completion {
        signal: Signal::new(),
        done: Latch::new(false),
    });
    (
        TimerHandle {
            completion: Arc::clone(&completion),
        },
        Publisher {
            completion,
            published: false,
        },
    )
}

//==================================================================================PUBLISHER
/// Run-loop side of the slot. Dropping it unpublished resolves the handle to
/// [`TimerError::Abandoned`], so a waiter can never hang on a vanished loop.
pub(crate) struct Publisher<R: Send> {
    completion: Arc<Completion<R>>,
    published: bool,
}

impl<R: Send> Publisher<R> {
    pub(crate) fn publish(mut self, outcome: TimerResult<R>) {
        self.completion.publish(outcome);
        self.published = true;
    }
}

impl<R: Send> Drop for Publisher<R> {
    fn drop(&mut self) {
        if !self.published {
            self.completion.publish(Err(TimerError::Abandoned));
        }
    }
}

//==================================================================================HANDLE
/// Handle to the eventual outcome of one activation.
///
/// Resolves to:
/// * `Ok(Some(value))`: the last value the callable produced;
/// * `Ok(None)`: the loop stopped before any invocation;
/// * `Err(_)`: the callable failed or panicked, or the loop could not start.
///
/// The outcome is delivered once. Either `.await` the handle or call one of the
/// blocking methods, not both.
#[must_use = "dropping the handle discards the outcome, the timer keeps running"]
pub struct TimerHandle<R: Send> {
    completion: Arc<Completion<R>>,
}

impl<R: Send> TimerHandle<R> {
    /// `true` once the run loop has published its outcome.
    pub fn is_finished(&self) -> bool {
        self.completion.done.is_set()
    }

    /// Block the calling thread until the outcome is available.
    pub fn wait(self) -> TimerResult<R> {
        self.completion.done.wait();
        self.take()
    }

    /// Block for at most `timeout`. Gives the handle back when the outcome is
    /// still pending.
    pub fn wait_timeout(self, timeout: Duration) -> Result<TimerResult<R>, Self> {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return Ok(self.wait());
        };
        if self.completion.done.wait_until(deadline) {
            Ok(self.take())
        } else {
            Err(self)
        }
    }

    /// Return the outcome if it is ready, the handle otherwise.
    pub fn try_take(self) -> Result<TimerResult<R>, Self> {
        if self.is_finished() {
            Ok(self.take())
        } else {
            Err(self)
        }
    }

    /// Resolve the handle with `err`, replacing anything published so far.
    /// Only used before the handle reaches the caller.
    pub(crate) fn fail(&self, err: TimerError) {
        self.completion.publish(Err(err));
    }

    fn take(&self) -> TimerResult<R> {
        self.completion
            .signal
            .try_take()
            .unwrap_or(Err(TimerError::Abandoned))
    }
}

impl<R: Send> Future for TimerHandle<R> {
    type Output = TimerResult<R>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // The signal keeps the registered waker once this future is dropped.
        let wait = self.completion.signal.wait();
        core::pin::pin!(wait).poll(cx)
    }
}

impl<R: Send> fmt::Debug for TimerHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("finished", &self.is_finished())
            .finish()
    }
}
