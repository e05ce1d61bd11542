//! Boolean signal guarded by its own mutex/condition-variable pair.
//!
//! The timer keeps two of them ("clock finished" and "run loop fully stopped").
//! Each latch owns its lock, so a notification sent on one can never satisfy a
//! waiter parked on the other.
use std::time::Instant;

use parking_lot::{Condvar, Mutex};

use crate::core::WaitOutcome;

//==================================================================================LATCH
/// Resettable boolean flag with blocking waiters.
#[derive(Debug, Default)]
pub struct Latch {
    flag: Mutex<bool>,
    cond: Condvar,
}

impl Latch {
    /// Create a latch in the given state.
    pub fn new(set: bool) -> Self {
        Self {
            flag: Mutex::new(set),
            cond: Condvar::new(),
        }
    }

    /// Raise the flag and wake every waiter.
    pub fn set(&self) {
        let mut flag = self.flag.lock();
        *flag = true;
        self.cond.notify_all();
    }

    /// Lower the flag. Waiters stay parked.
    pub fn reset(&self) {
        *self.flag.lock() = false;
    }

    /// Current state of the flag.
    pub fn is_set(&self) -> bool {
        *self.flag.lock()
    }

    /// Wake every waiter without touching the flag so they re-check their condition.
    pub fn wake(&self) {
        let _flag = self.flag.lock();
        self.cond.notify_all();
    }

    /// Block until the flag is raised.
    pub fn wait(&self) {
        let mut flag = self.flag.lock();
        while !*flag {
            self.cond.wait(&mut flag);
        }
    }

    /// Block until the flag is raised or `deadline` passes.
    ///
    /// Returns `true` when the flag was observed raised.
    pub fn wait_until(&self, deadline: Instant) -> bool {
        let mut flag = self.flag.lock();
        while !*flag {
            if Instant::now() >= deadline {
                return false;
            }
            self.cond.wait_until(&mut flag, deadline);
        }
        true
    }

    /// Park on this latch's condition variable until `deadline` passes or
    /// `cancelled` returns `true`, ignoring the flag itself.
    ///
    /// `cancelled` is evaluated with the latch lock held, so a canceller that
    /// updates its state before calling [`Latch::wake`] cannot be missed.
    /// `None` means no deadline: only cancellation ends the wait.
    pub fn park_until<C>(&self, deadline: Option<Instant>, cancelled: C) -> WaitOutcome
    where
        C: Fn() -> bool,
    {
        let mut flag = self.flag.lock();
        loop {
            if cancelled() {
                return WaitOutcome::Cancelled;
            }
            match deadline {
                Some(deadline) => {
                    if Instant::now() >= deadline {
                        return WaitOutcome::Elapsed;
                    }
                    // Spurious wakeups fall through to the checks above;
                    // the deadline itself is never re-armed.
                    self.cond.wait_until(&mut flag, deadline);
                }
                None => self.cond.wait(&mut flag),
            }
        }
    }
}
