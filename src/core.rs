//! Plain data types shared by the clock, the run loop and the restart coordinator.

/// Mode a freshly built timer starts in.
pub const DEFAULT_MODE: TimerMode = TimerMode::SingleShot;

/// Name given to run loop threads unless the builder overrides it.
pub const DEFAULT_THREAD_NAME: &str = "korri-timer";

/// Loop-continuation policy.
///
/// The policy is read at the run loop's decision point (right after an
/// invocation), so switching it never aborts a countdown or an invocation
/// already in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerMode {
    /// Exit after the first successful invocation.
    SingleShot,
    /// Re-arm and re-invoke until stopped.
    Periodic,
}

impl TimerMode {
    /// `true` for [`TimerMode::SingleShot`].
    #[inline]
    pub const fn is_single_shot(self) -> bool {
        matches!(self, Self::SingleShot)
    }

    pub(crate) const fn from_single_shot(single_shot: bool) -> Self {
        if single_shot {
            Self::SingleShot
        } else {
            Self::Periodic
        }
    }
}

impl Default for TimerMode {
    fn default() -> Self {
        DEFAULT_MODE
    }
}

/// How a countdown ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The deadline was reached.
    Elapsed,
    /// `running` was observed false before the deadline.
    Cancelled,
}

/// Coarse lifecycle of a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// No run loop is alive.
    Idle,
    /// A run loop is alive (it may already have been asked to stop).
    Active,
}
