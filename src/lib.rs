//! `korri-timer` library: a restartable timer that runs a callable on a
//! background thread after a delay, once or periodically, and can be stopped,
//! restarted, and switched between one-shot and periodic while running.
//!
//! ```no_run
//! use std::time::Duration;
//! use korri_timer::timer::Timer;
//!
//! let timer = Timer::builder().periodic().build();
//! let ticks = timer.start(Duration::from_millis(250), || println!("tick"));
//! std::thread::sleep(Duration::from_secs(1));
//! timer.stop();
//! let _ = ticks.wait();
//! ```
//==================================================================================
/// Data types shared by every component (modes, wait outcomes, defaults).
pub mod core;
/// Errors surfaced through timer handles.
pub mod error;
/// Low-level synchronization primitives.
pub mod infra;
/// Timer implementation: clock, run loop, restart coordinator, result handle.
pub mod timer;
//==================================================================================
pub use crate::core::{TimerMode, TimerState, WaitOutcome};
pub use crate::error::{TimerError, TimerResult};
pub use crate::timer::{handle::TimerHandle, Timer};
