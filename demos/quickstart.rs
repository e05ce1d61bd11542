//! # Quickstart Example
//!
//! Minimal tour of korri-timer:
//! - Fire a callable once after a delay
//! - Run a periodic callable and stop it
//! - Restart a timer with new parameters
//!
//! ```bash
//! cargo run --example quickstart
//! ```

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use korri_timer::Timer;

fn main() {
    println!("=== korri-timer Quickstart ===\n");

    // ======================================================================
    // 1. One-shot
    // ======================================================================
    println!("1. One-shot timer (200 ms)");

    let timer = Timer::new();
    let started = Instant::now();
    let handle = timer.start(Duration::from_millis(200), move || started.elapsed());
    match handle.wait() {
        Ok(Some(elapsed)) => println!("   fired after {elapsed:?}\n"),
        other => println!("   unexpected outcome: {other:?}\n"),
    }

    // ======================================================================
    // 2. Periodic + stop
    // ======================================================================
    println!("2. Periodic timer (100 ms), stopped after ~550 ms");

    let ticks = Arc::new(AtomicU32::new(0));
    let periodic = Timer::builder()
        .periodic()
        .with_thread_name("quickstart-ticker")
        .build();
    let handle = {
        let ticks = Arc::clone(&ticks);
        periodic.start(Duration::from_millis(100), move || {
            let n = ticks.fetch_add(1, Ordering::SeqCst) + 1;
            println!("   tick #{n}");
            n
        })
    };
    thread::sleep(Duration::from_millis(550));
    periodic.stop();
    match handle.wait() {
        Ok(Some(last)) => println!("   stopped, last tick was #{last}\n"),
        other => println!("   unexpected outcome: {other:?}\n"),
    }

    // ======================================================================
    // 3. Restart
    // ======================================================================
    println!("3. Restart: a 10 s countdown replaced by a 50 ms one");

    let slow = timer.start(Duration::from_secs(10), || "slow");
    let fast = timer.start(Duration::from_millis(50), || "fast");
    println!("   first activation  -> {:?}", slow.wait());
    println!("   second activation -> {:?}", fast.wait());

    println!("\n=== Done ===");
}
