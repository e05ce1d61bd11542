//! Fluent configuration for [`Timer`].
use crate::core::{TimerMode, DEFAULT_MODE, DEFAULT_THREAD_NAME};
use crate::timer::Timer;

#[derive(Debug, Clone)]
/// Builder collecting the initial mode and the run loop thread name.
pub struct TimerBuilder {
    pub mode: TimerMode,
    pub thread_name: String,
}

impl TimerBuilder {
    /// Defaults: [`DEFAULT_MODE`], threads named [`DEFAULT_THREAD_NAME`].
    pub fn new() -> Self {
        Self {
            mode: DEFAULT_MODE,
            thread_name: DEFAULT_THREAD_NAME.to_owned(),
        }
    }

    /// Initial loop-continuation policy.
    pub fn with_mode(mut self, mode: TimerMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for `with_mode(TimerMode::SingleShot)`.
    pub fn single_shot(self) -> Self {
        self.with_mode(TimerMode::SingleShot)
    }

    /// Shorthand for `with_mode(TimerMode::Periodic)`.
    pub fn periodic(self) -> Self {
        self.with_mode(TimerMode::Periodic)
    }

    /// Name of the threads spawned for each activation (shows up in panics and debuggers).
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Build an idle timer.
    pub fn build(self) -> Timer {
        Timer::with_parts(self.mode, self.thread_name)
    }
}

impl Default for TimerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
