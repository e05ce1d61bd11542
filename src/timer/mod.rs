//! The timer: a restartable countdown that runs a callable on a background
//! thread, once or periodically.
//!
//! Components:
//! * [`clock`]: deadline-based countdown that a stop request can cut short;
//! * [`run_loop`]: wait / re-check / invoke cycle on the background thread;
//! * [`coordinator`]: serializes `start` calls so loops never overlap;
//! * [`handle`]: the deferred result returned by `start`.
//!
//! ```text
//! IDLE --start()--> ACTIVE
//! ACTIVE --stop() or single-shot completion--> IDLE
//! ACTIVE --start()--> [wait for ACTIVE -> IDLE] --> ACTIVE (new loop)
//! ```
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::core::{TimerMode, TimerState, DEFAULT_MODE, DEFAULT_THREAD_NAME};
use crate::error::BoxError;
use crate::infra::latch::Latch;

pub mod builder;
pub mod clock;
pub(crate) mod coordinator;
pub mod handle;
pub(crate) mod run_loop;
pub mod traits;

use builder::TimerBuilder;
use handle::TimerHandle;
use traits::timer_task::{BoundTask, FnTask, TimerTask, TryFnTask};

//==================================================================================SHARED
/// State shared between a [`Timer`] and its run loop thread.
pub(crate) struct Shared {
    /// True while a run loop should keep going.
    pub(crate) running: AtomicBool,
    /// Loop-continuation policy, read after each invocation.
    pub(crate) single_shot: AtomicBool,
    /// "Clock finished waiting" signal; its condvar also parks the countdown.
    pub(crate) clock_finished: Latch,
    /// "Run loop fully stopped" signal; raised while no loop is alive.
    pub(crate) loop_stopped: Latch,
    /// Serializes concurrent `start` calls.
    pub(crate) restart: Mutex<()>,
}

impl Shared {
    fn new(mode: TimerMode) -> Self {
        Self {
            running: AtomicBool::new(false),
            single_shot: AtomicBool::new(mode.is_single_shot()),
            clock_finished: Latch::new(false),
            loop_stopped: Latch::new(true),
            restart: Mutex::new(()),
        }
    }

    /// Clear `running` and wake a countdown in progress. Never blocks on the loop.
    pub(crate) fn request_stop(&self) {
        self.running.store(false, Ordering::Release);
        self.clock_finished.wake();
    }
}

//==================================================================================TIMER
/// Restartable one-shot / periodic timer.
///
/// `start*` methods return immediately with a [`TimerHandle`] unless a previous
/// run loop is still alive, in which case they stop it and wait for it to exit
/// first. Only one run loop exists per timer at any time.
///
/// ```no_run
/// use std::time::Duration;
/// use korri_timer::timer::Timer;
///
/// let timer = Timer::new();
/// let handle = timer.start(Duration::from_millis(100), || 21 * 2);
/// assert_eq!(handle.wait().unwrap(), Some(42));
/// ```
pub struct Timer {
    shared: Arc<Shared>,
    thread_name: String,
}

impl Timer {
    /// Idle timer in the default mode ([`DEFAULT_MODE`]).
    pub fn new() -> Self {
        Self::with_parts(DEFAULT_MODE, DEFAULT_THREAD_NAME.to_owned())
    }

    /// Fluent configuration entry point.
    pub fn builder() -> TimerBuilder {
        TimerBuilder::new()
    }

    pub(crate) fn with_parts(mode: TimerMode, thread_name: String) -> Self {
        Self {
            shared: Arc::new(Shared::new(mode)),
            thread_name,
        }
    }

    // Activation
    /// Run `f` after `duration`, repeating while the timer is periodic.
    pub fn start<F, R>(&self, duration: Duration, f: F) -> TimerHandle<R>
    where
        F: FnMut() -> R + Send + 'static,
        R: Send + 'static,
    {
        self.start_task(duration, FnTask(f))
    }

    /// Like [`Timer::start`], `args` is cloned for every invocation.
    pub fn start_with<F, A, R>(&self, duration: Duration, f: F, args: A) -> TimerHandle<R>
    where
        F: FnMut(A) -> R + Send + 'static,
        A: Clone + Send + 'static,
        R: Send + 'static,
    {
        self.start_task(duration, BoundTask::new(f, args))
    }

    /// Run a fallible callable; the first `Err` stops the loop and resolves the handle.
    pub fn try_start<F, R, E>(&self, duration: Duration, f: F) -> TimerHandle<R>
    where
        F: FnMut() -> Result<R, E> + Send + 'static,
        R: Send + 'static,
        E: Into<BoxError>,
    {
        self.start_task(duration, TryFnTask(f))
    }

    /// Run any [`TimerTask`].
    pub fn start_task<T: TimerTask>(
        &self,
        duration: Duration,
        task: T,
    ) -> TimerHandle<T::Output> {
        coordinator::launch(&self.shared, &self.thread_name, duration, task)
    }

    /// Switch to single-shot and start.
    pub fn start_one_shot<F, R>(&self, duration: Duration, f: F) -> TimerHandle<R>
    where
        F: FnMut() -> R + Send + 'static,
        R: Send + 'static,
    {
        self.set_single_shot();
        self.start(duration, f)
    }

    /// Switch to periodic and start.
    pub fn start_periodic<F, R>(&self, duration: Duration, f: F) -> TimerHandle<R>
    where
        F: FnMut() -> R + Send + 'static,
        R: Send + 'static,
    {
        self.set_periodic();
        self.start(duration, f)
    }

    /// Ask the current run loop to stop. Returns immediately; idempotent.
    ///
    /// An invocation in progress is never interrupted: the loop exits at its
    /// next checkpoint.
    pub fn stop(&self) {
        #[cfg(feature = "log")]
        if self.is_active() {
            log::debug!("stop requested on `{}`", self.thread_name);
        }
        self.shared.request_stop();
    }

    // Mode
    /// Exit after the next invocation.
    pub fn set_single_shot(&self) {
        self.set_mode(TimerMode::SingleShot);
    }

    /// Keep re-arming after each invocation.
    pub fn set_periodic(&self) {
        self.set_mode(TimerMode::Periodic);
    }

    /// Takes effect at the run loop's next decision point.
    pub fn set_mode(&self, mode: TimerMode) {
        self.shared
            .single_shot
            .store(mode.is_single_shot(), Ordering::Release);
    }

    pub fn mode(&self) -> TimerMode {
        TimerMode::from_single_shot(self.shared.single_shot.load(Ordering::Acquire))
    }

    pub fn is_single_shot(&self) -> bool {
        self.mode().is_single_shot()
    }

    // State
    /// Value of the `running` flag.
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    /// `true` while a run loop is alive, including one asked to stop that has
    /// not exited yet.
    pub fn is_active(&self) -> bool {
        !self.shared.loop_stopped.is_set()
    }

    pub fn state(&self) -> TimerState {
        if self.is_active() {
            TimerState::Active
        } else {
            TimerState::Idle
        }
    }

    /// Name given to run loop threads.
    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.shared.request_stop();
    }
}

impl core::fmt::Debug for Timer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Timer")
            .field("thread_name", &self.thread_name)
            .field("mode", &self.mode())
            .field("running", &self.is_running())
            .field("state", &self.state())
            .finish()
    }
}
