//! Awaiting timer handles from async code.
mod helpers {
    include!("helpers/mod.rs");
}

use helpers::{OverlapProbe, SETTLE};
use korri_timer::{Timer, TimerError};
use std::time::Duration;
use tokio::time::timeout;

#[tokio::test]
async fn test_await_single_shot() {
    let timer = Timer::new();
    let handle = timer.start(Duration::from_millis(20), || 42_u64);

    let outcome = timeout(SETTLE, handle).await.expect("handle never resolved");
    assert!(matches!(outcome, Ok(Some(42))));
}

#[tokio::test]
async fn test_await_periodic_after_stop() {
    let timer = Timer::builder().periodic().build();
    let probe = OverlapProbe::new();
    let handle = {
        let probe = probe.clone();
        timer.start(Duration::from_millis(5), move || {
            let _guard = probe.enter();
            probe.total()
        })
    };

    while probe.total() < 3 {
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    timer.stop();

    let last = timeout(SETTLE, handle)
        .await
        .expect("handle never resolved")
        .unwrap()
        .unwrap();
    assert!(last >= 3);
}

#[tokio::test]
async fn test_await_failure() {
    let timer = Timer::new();
    let handle = timer.try_start(Duration::ZERO, || -> Result<(), std::io::Error> {
        Err(std::io::Error::other("link down"))
    });

    match timeout(SETTLE, handle).await.expect("handle never resolved") {
        Err(TimerError::Callable(err)) => assert_eq!(err.to_string(), "link down"),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
/// Several timers driven from one task resolve independently.
async fn test_await_many_timers() {
    let timers: Vec<Timer> = (0..4).map(|_| Timer::new()).collect();
    let handles: Vec<_> = timers
        .iter()
        .enumerate()
        .map(|(i, timer)| timer.start(Duration::from_millis(5 * i as u64), move || i))
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let outcome = timeout(SETTLE, handle).await.expect("handle never resolved");
        assert!(matches!(outcome, Ok(Some(v)) if v == i));
    }
}
