// Instrumentation shared by the integration tests: invocation counters,
// overlap detection, and a one-way gate to hold a callable mid-flight.
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

#[allow(dead_code)]
/// Generous upper bound for anything that should happen "soon".
pub const SETTLE: Duration = Duration::from_secs(5);

#[derive(Default)]
#[allow(dead_code)]
/// Tracks how many invocations run at the same time.
pub struct OverlapProbe {
    current: AtomicUsize,
    max: AtomicUsize,
    total: AtomicUsize,
}

#[allow(dead_code)]
impl OverlapProbe {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Mark an invocation as started; the returned guard marks it finished.
    pub fn enter(&self) -> ProbeGuard<'_> {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.max.fetch_max(now, Ordering::SeqCst);
        self.total.fetch_add(1, Ordering::SeqCst);
        ProbeGuard(self)
    }

    /// Highest number of simultaneous invocations observed.
    pub fn max(&self) -> usize {
        self.max.load(Ordering::SeqCst)
    }

    /// Number of invocations started so far.
    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    /// Invocations currently running.
    pub fn in_flight(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }

    /// Spin until at least `count` invocations started, or panic after `SETTLE`.
    pub fn wait_total(&self, count: usize) {
        let deadline = Instant::now() + SETTLE;
        while self.total() < count {
            assert!(
                Instant::now() < deadline,
                "only {} of {count} invocations observed",
                self.total()
            );
            std::thread::sleep(Duration::from_millis(1));
        }
    }
}

#[allow(dead_code)]
pub struct ProbeGuard<'a>(&'a OverlapProbe);

impl Drop for ProbeGuard<'_> {
    fn drop(&mut self) {
        self.0.current.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
#[allow(dead_code)]
/// One-way gate: closed until `open` is called.
pub struct Gate {
    open: Mutex<bool>,
    cond: Condvar,
}

#[allow(dead_code)]
impl Gate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn open(&self) {
        *self.open.lock().unwrap() = true;
        self.cond.notify_all();
    }

    pub fn is_open(&self) -> bool {
        *self.open.lock().unwrap()
    }

    /// Block until the gate opens, panicking after `SETTLE`.
    pub fn pass(&self) {
        let guard = self.open.lock().unwrap();
        let (guard, timeout) = self
            .cond
            .wait_timeout_while(guard, SETTLE, |open| !*open)
            .unwrap();
        assert!(!timeout.timed_out() && *guard, "gate never opened");
    }
}
