//! Restart coordinator: guards the "no run loop" → "run loop" transition so
//! that at most one run loop exists per timer.
//!
//! Sequence for a restart:
//! 1. `running = false` and the clock is woken;
//! 2. the previous loop leaves its countdown or finishes its in-flight
//!    invocation, re-checks `running`, and raises "fully stopped";
//! 3. the caller wakes up, re-arms "fully stopped", sets `running = true`
//!    and spawns the new loop.
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::timer::handle::{self, TimerHandle};
use crate::timer::run_loop::RunLoop;
use crate::timer::traits::timer_task::TimerTask;
use crate::timer::Shared;

/// Start a new run loop, stopping and awaiting the current one first if needed.
///
/// Never blocks when the timer is idle. Blocks the calling thread (not the
/// in-flight callable) while a previous loop winds down.
pub(crate) fn launch<T: TimerTask>(
    shared: &Arc<Shared>,
    thread_name: &str,
    duration: Duration,
    task: T,
) -> TimerHandle<T::Output> {
    // Concurrent starters are served one after the other.
    let _serial = shared.restart.lock();

    // A loop that was told to stop but has not exited yet still counts as
    // active: `running` alone cannot tell us it is gone.
    if !shared.loop_stopped.is_set() {
        #[cfg(feature = "log")]
        log::debug!("restart requested, waiting for the previous run loop to exit");

        shared.request_stop();
        shared.loop_stopped.wait();
    }

    shared.loop_stopped.reset();
    shared.running.store(true, Ordering::Release);

    let (handle, publisher) = handle::channel();
    let run_loop = RunLoop::new(Arc::clone(shared), duration, task, publisher);

    let spawned = thread::Builder::new()
        .name(thread_name.to_owned())
        .spawn(move || run_loop.run());

    match spawned {
        Ok(_detached) => {
            #[cfg(feature = "log")]
            log::debug!("run loop started on `{thread_name}` ({duration:?})");
        }
        Err(err) => {
            #[cfg(feature = "log")]
            log::error!("unable to spawn run loop thread: {err}");

            // The closure (and its publisher) is already gone; roll back to idle.
            shared.running.store(false, Ordering::Release);
            shared.loop_stopped.set();
            handle.fail(err.into());
        }
    }

    handle
}
