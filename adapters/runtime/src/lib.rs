#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-rate scheduling for the simulation driver.
//!
//! A timer thread posts messages into a single-consumer channel at a fixed
//! cadence, the consumer loop stays the only owner of the session state, and
//! the returned handle cancels exactly once no matter how often it is asked
//! to. Simulation tick rate is thereby independent of whatever cadence a
//! rendering collaborator runs at.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::Sender,
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

/// Cancellation handle for a scheduled fixed-rate timer.
///
/// Dropping the handle cancels the timer as well, so a driver that unwinds
/// early never leaks a ticking thread.
#[derive(Debug)]
pub struct TimerHandle {
    stop: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl TimerHandle {
    /// Stops the timer and joins its thread. Idempotent: later calls are
    /// no-ops, so the terminal transition may cancel without bookkeeping.
    pub fn cancel(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                tracing::debug!("timer thread terminated abnormally");
            }
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Schedules `make()` to be posted through `sender` once per `interval`.
///
/// The cadence is corrected against an absolute deadline rather than
/// accumulated sleeps, so long-running timers do not drift. Cadences below
/// one millisecond are clamped up to it. The timer stops on its own when
/// the receiving end of the channel goes away.
pub fn schedule_fixed_rate<M, F>(interval: Duration, sender: Sender<M>, mut make: F) -> TimerHandle
where
    M: Send + 'static,
    F: FnMut() -> M + Send + 'static,
{
    let interval = interval.max(Duration::from_millis(1));
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = Arc::clone(&stop);

    let thread = thread::spawn(move || {
        let mut deadline = Instant::now() + interval;
        loop {
            if stop_flag.load(Ordering::Relaxed) {
                break;
            }

            let now = Instant::now();
            if now < deadline {
                thread::sleep(deadline - now);
                continue;
            }

            if sender.send(make()).is_err() {
                tracing::debug!("timer receiver dropped, stopping");
                break;
            }
            deadline += interval;
        }
    });

    TimerHandle {
        stop,
        thread: Some(thread),
    }
}
