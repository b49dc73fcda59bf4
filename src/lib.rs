//! A door with a timed auto-alarm.
//!
//! A [`TimedDoor`] can be unlocked and locked. Registering its
//! [`DoorTimerAdapter`] with a [`Timer`] blocks for a duration and then
//! checks the door: if it is still open the registration returns
//! [`DoorError::Alarm`].

pub mod config;
pub mod door;
pub mod error;
pub mod timer;
pub mod ui;
pub mod watch;

pub use door::{DoorAction, DoorState, DoorTimerAdapter, TimedDoor};
pub use error::DoorError;
pub use timer::{ManualClock, Sleeper, ThreadSleeper, Timer, TimerClient};
pub use watch::{AlarmReport, WatchObserver, WatchRun, run_watch};
