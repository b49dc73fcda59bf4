//! Blocking one-shot timer and the capability it calls back into.
//!
//! [`Timer::register_client`] blocks the caller for the requested number of
//! seconds, then runs the client's [`TimerClient::on_timeout`] before
//! returning. The delay itself goes through a [`Sleeper`], so tests can swap
//! the real thread sleep for a [`ManualClock`] without touching the timer.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use tracing::debug;

use crate::error::DoorError;

/// Something that wants to hear about timer expiry.
pub trait TimerClient {
    fn on_timeout(&self) -> Result<(), DoorError>;
}

/// Scoped delay of the current execution context.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Blocks the calling thread with [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual clock: every sleep returns immediately and only advances a
/// counter.
#[derive(Debug, Default)]
pub struct ManualClock {
    elapsed_ms: AtomicU64,
    sleeps: AtomicUsize,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total virtual time slept so far.
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms.load(Ordering::Acquire))
    }

    /// Number of sleep calls seen.
    pub fn sleeps(&self) -> usize {
        self.sleeps.load(Ordering::Acquire)
    }
}

impl Sleeper for ManualClock {
    fn sleep(&self, duration: Duration) {
        let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        // The closure never returns None, so the update always commits.
        let _ = self
            .elapsed_ms
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |elapsed| {
                Some(elapsed.saturating_add(ms))
            });
        self.sleeps.fetch_add(1, Ordering::AcqRel);
    }
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}

/// One-shot blocking timer.
///
/// Registration takes `&mut self`, so a single timer can never serve two
/// registrations at once. Use one timer per concurrent wait.
#[derive(Debug)]
pub struct Timer<S = ThreadSleeper> {
    sleeper: S,
    registrations: usize,
    last_duration: Option<Duration>,
}

impl Timer<ThreadSleeper> {
    pub fn new() -> Self {
        Self::with_sleeper(ThreadSleeper)
    }
}

impl Default for Timer<ThreadSleeper> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Sleeper> Timer<S> {
    pub fn with_sleeper(sleeper: S) -> Self {
        Self {
            sleeper,
            registrations: 0,
            last_duration: None,
        }
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Block for `duration_secs` seconds.
    pub fn sleep(&self, duration_secs: u64) {
        self.sleeper.sleep(Duration::from_secs(duration_secs));
    }

    /// Wait `duration_secs` seconds, then call `client.on_timeout()`.
    ///
    /// Does not return until the callback has run. Any error from the
    /// client is returned unchanged. A duration of zero fires immediately.
    pub fn register_client(
        &mut self,
        duration_secs: u64,
        client: &dyn TimerClient,
    ) -> Result<(), DoorError> {
        self.registrations += 1;
        self.last_duration = Some(Duration::from_secs(duration_secs));
        debug!(
            duration_secs,
            registration = self.registrations,
            "timer client registered"
        );

        self.sleep(duration_secs);
        client.on_timeout()
    }

    /// How many registrations this timer has served.
    pub fn registrations(&self) -> usize {
        self.registrations
    }

    /// Duration of the most recent registration.
    pub fn last_duration(&self) -> Option<Duration> {
        self.last_duration
    }
}
