//! Abstraction traits used by the run loop.
pub mod timer_task;
