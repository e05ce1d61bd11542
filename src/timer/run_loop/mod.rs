//! Background loop: count down, re-check `running`, invoke, repeat.
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{TimerError, TimerResult};
use crate::timer::clock::Clock;
use crate::timer::handle::Publisher;
use crate::timer::traits::timer_task::TimerTask;
use crate::timer::Shared;

/// One activation of a timer, moved onto its own thread by the coordinator.
pub(crate) struct RunLoop<T: TimerTask> {
    shared: Arc<Shared>,
    duration: Duration,
    task: T,
    publisher: Publisher<T::Output>,
}

impl<T: TimerTask> RunLoop<T> {
    pub(crate) fn new(
        shared: Arc<Shared>,
        duration: Duration,
        task: T,
        publisher: Publisher<T::Output>,
    ) -> Self {
        Self {
            shared,
            duration,
            task,
            publisher,
        }
    }

    /// Drive the loop to completion, then run the exit sequence and publish.
    ///
    /// The exit sequence (`running = false`, "fully stopped" raised) happens
    /// before the outcome is published, so a caller that saw the handle resolve
    /// also sees the timer idle.
    pub(crate) fn run(self) {
        let Self {
            shared,
            duration,
            mut task,
            publisher,
        } = self;

        let outcome = {
            let _exit = ExitGuard(&shared);
            drive(&shared, duration, &mut task)
        };

        #[cfg(feature = "log")]
        match &outcome {
            Ok(Some(_)) => log::debug!("run loop exited with a result"),
            Ok(None) => log::debug!("run loop exited before any invocation"),
            Err(err) => log::warn!("run loop exited on failure: {err}"),
        }

        publisher.publish(outcome);
    }
}

fn drive<T: TimerTask>(
    shared: &Shared,
    duration: Duration,
    task: &mut T,
) -> TimerResult<T::Output> {
    let clock = Clock::new(&shared.running, &shared.clock_finished);
    let mut last = None;

    while shared.running.load(Ordering::Acquire) {
        // Step 1: countdown.
        let _outcome = clock.wait(duration);

        // Step 2: rendezvous with the clock's completion signal.
        shared.clock_finished.wait();

        // Step 3: the clock's return value is not trusted, a stop may have
        // raced a natural completion.
        if !shared.running.load(Ordering::Acquire) {
            #[cfg(feature = "log")]
            log::debug!("stop observed after countdown ({_outcome:?}), skipping invocation");
            break;
        }

        // Step 4: invoke. Panics end the loop like any other failure.
        match panic::catch_unwind(AssertUnwindSafe(|| task.invoke())) {
            Ok(Ok(value)) => last = Some(value),
            Ok(Err(err)) => return Err(err),
            Err(payload) => return Err(TimerError::from_panic(payload)),
        }

        // Step 5: decision point.
        if shared.single_shot.load(Ordering::Acquire) {
            break;
        }
    }

    Ok(last)
}

/// Runs the exit sequence even if the loop unwinds.
struct ExitGuard<'a>(&'a Shared);

impl Drop for ExitGuard<'_> {
    fn drop(&mut self) {
        self.0.running.store(false, Ordering::Release);
        self.0.loop_stopped.set();
    }
}
