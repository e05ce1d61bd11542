//! Work executed by a timer each time its countdown elapses.
//!
//! The run loop only knows about [`TimerTask`]; the adapters below turn plain
//! closures into tasks so `Timer::start`, `Timer::start_with` and
//! `Timer::try_start` share one loop implementation.
use crate::error::{BoxError, TimerError};

/// Contract for the work a timer runs from its background thread.
///
/// Implementations must be safe to invoke from a thread other than the one
/// that started the timer and must not rely on thread identity.
pub trait TimerTask: Send + 'static {
    /// Value produced by one invocation.
    type Output: Send + 'static;

    /// Run once. Returning `Err` ends the run loop and surfaces the error
    /// through the activation's handle.
    fn invoke(&mut self) -> Result<Self::Output, TimerError>;
}

/// Infallible closure without arguments.
pub struct FnTask<F>(pub F);

impl<F, R> TimerTask for FnTask<F>
where
    F: FnMut() -> R + Send + 'static,
    R: Send + 'static,
{
    type Output = R;

    fn invoke(&mut self) -> Result<R, TimerError> {
        Ok((self.0)())
    }
}

/// Closure returning `Result`; an `Err` stops the loop.
pub struct TryFnTask<F>(pub F);

impl<F, R, E> TimerTask for TryFnTask<F>
where
    F: FnMut() -> Result<R, E> + Send + 'static,
    R: Send + 'static,
    E: Into<BoxError>,
{
    type Output = R;

    fn invoke(&mut self) -> Result<R, TimerError> {
        (self.0)().map_err(TimerError::callable)
    }
}

/// Closure with bound arguments, cloned for every invocation.
pub struct BoundTask<F, A> {
    func: F,
    args: A,
}

impl<F, A> BoundTask<F, A> {
    pub fn new(func: F, args: A) -> Self {
        Self { func, args }
    }
}

impl<F, A, R> TimerTask for BoundTask<F, A>
where
    F: FnMut(A) -> R + Send + 'static,
    A: Clone + Send + 'static,
    R: Send + 'static,
{
    type Output = R;

    fn invoke(&mut self) -> Result<R, TimerError> {
        Ok((self.func)(self.args.clone()))
    }
}
