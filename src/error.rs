//! Error definitions shared across library modules.
//! Every failure is local to one activation of a timer: it travels through the
//! [`TimerHandle`](crate::timer::handle::TimerHandle) of that activation and
//! never through the timer's running/idle state.
use thiserror::Error;

/// Boxed error produced by a fallible callable.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
/// Reasons an activation can end without a regular outcome.
pub enum TimerError {
    /// A fallible callable returned `Err`; the run loop stopped on it.
    #[error("Callable failed: {0}")]
    Callable(#[source] BoxError),

    /// The callable panicked; the panic was caught at the invocation checkpoint.
    #[error("Callable panicked: {message}")]
    Panicked { message: String },

    /// The operating system refused to spawn the run loop thread.
    #[error("Unable to spawn the run loop thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// The run loop went away without publishing an outcome.
    #[error("Run loop exited without an outcome")]
    Abandoned,
}

impl TimerError {
    /// Wrap any error returned by a fallible callable.
    pub fn callable<E: Into<BoxError>>(err: E) -> Self {
        Self::Callable(err.into())
    }

    /// Build a [`TimerError::Panicked`] from a payload caught by `catch_unwind`.
    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            String::from("non-string panic payload")
        };
        Self::Panicked { message }
    }
}

/// Outcome published by one activation.
pub type TimerResult<R> = Result<Option<R>, TimerError>;
