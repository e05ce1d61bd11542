//! Unit tests for `TimerBuilder`.
use super::*;
use std::time::Duration;

#[test]
/// Defaults match the crate constants and produce an idle timer.
fn test_builder_defaults() {
    let timer = TimerBuilder::new().build();
    assert_eq!(timer.mode(), DEFAULT_MODE);
    assert_eq!(timer.thread_name(), DEFAULT_THREAD_NAME);
    assert!(!timer.is_running());
    assert!(!timer.is_active());
}

#[test]
/// Mode and thread name are carried into the timer.
fn test_builder_overrides() {
    let timer = Timer::builder()
        .periodic()
        .with_thread_name("heartbeat")
        .build();
    assert_eq!(timer.mode(), TimerMode::Periodic);
    assert_eq!(timer.thread_name(), "heartbeat");

    let timer = Timer::builder().periodic().single_shot().build();
    assert!(timer.is_single_shot());
}

#[test]
/// Run loop threads carry the configured name.
fn test_thread_name_applied() {
    let timer = Timer::builder().with_thread_name("named-loop").build();
    let handle = timer.start(Duration::ZERO, || {
        std::thread::current().name().map(str::to_owned)
    });
    let name = handle.wait().unwrap().flatten();
    assert_eq!(name.as_deref(), Some("named-loop"));
}
