//! Low-level building blocks the timer is assembled from.
pub mod latch;
