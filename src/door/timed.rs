use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::debug;

use super::adapter::DoorTimerAdapter;
use super::state::{DoorAction, DoorState};
use crate::error::DoorError;
use crate::timer::{Sleeper, Timer, TimerClient};

/// A door that raises an alarm if it stays unlocked past its timeout.
///
/// The open flag is atomic, so a timer running on another thread may check
/// it through the door's adapter while the owner locks and unlocks.
#[derive(Debug)]
pub struct TimedDoor {
    open: AtomicBool,
    timeout_secs: u64,
}

impl TimedDoor {
    /// Create a closed door. The timeout must be at least one second.
    pub fn new(timeout_secs: u64) -> Result<Self, DoorError> {
        if timeout_secs == 0 {
            return Err(DoorError::InvalidTimeout(timeout_secs));
        }
        Ok(Self {
            open: AtomicBool::new(false),
            timeout_secs,
        })
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    pub fn state(&self) -> DoorState {
        DoorState::from_open(self.is_open())
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Open the door. Fails with [`DoorError::AlreadyOpen`] and leaves the
    /// door untouched if it is already open.
    pub fn unlock(&self) -> Result<(), DoorError> {
        self.transition(DoorAction::Unlock)
    }

    /// Close the door. Fails with [`DoorError::AlreadyClosed`] and leaves the
    /// door untouched if it is already closed.
    pub fn lock(&self) -> Result<(), DoorError> {
        self.transition(DoorAction::Lock)
    }

    /// The timer client bound to this door.
    pub fn adapter(&self) -> DoorTimerAdapter<'_> {
        DoorTimerAdapter::new(self)
    }

    /// Run the timeout check now, without waiting on a timer.
    pub fn raise_if_still_open(&self) -> Result<(), DoorError> {
        self.adapter().on_timeout()
    }

    /// Register this door with `timer` for its configured timeout. Blocks
    /// until the timeout has elapsed and the check has run.
    pub fn watch<S: Sleeper>(&self, timer: &mut Timer<S>) -> Result<(), DoorError> {
        timer.register_client(self.timeout_secs, &self.adapter())
    }

    // The compare-and-swap only commits when the transition table accepts
    // the observed state, so a refused action never writes.
    fn transition(&self, action: DoorAction) -> Result<(), DoorError> {
        self.open
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |open| {
                DoorState::from_open(open).apply(action).ok().map(DoorState::is_open)
            })
            .map_err(|_| action.refusal())?;
        debug!(?action, state = %self.state(), "door transition");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualClock;

    fn make_door() -> TimedDoor {
        TimedDoor::new(4).unwrap()
    }

    #[test]
    fn fresh_door_is_closed() {
        let door = make_door();
        assert!(!door.is_open());
        assert_eq!(door.state(), DoorState::Closed);
        assert_eq!(door.timeout_secs(), 4);
        assert_eq!(door.timeout(), Duration::from_secs(4));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert_eq!(TimedDoor::new(0).unwrap_err(), DoorError::InvalidTimeout(0));
    }

    #[test]
    fn unlock_then_lock() {
        let door = make_door();
        door.unlock().unwrap();
        assert!(door.is_open());
        door.lock().unwrap();
        assert!(!door.is_open());
    }

    #[test]
    fn lock_on_closed_door_fails_without_change() {
        let door = make_door();
        assert_eq!(door.lock(), Err(DoorError::AlreadyClosed));
        assert!(!door.is_open());
    }

    #[test]
    fn unlock_twice_fails_without_change() {
        let door = make_door();
        door.unlock().unwrap();
        assert_eq!(door.unlock(), Err(DoorError::AlreadyOpen));
        assert!(door.is_open());
    }

    #[test]
    fn lock_after_full_cycle_fails() {
        let door = make_door();
        door.unlock().unwrap();
        door.lock().unwrap();
        assert_eq!(door.lock(), Err(DoorError::AlreadyClosed));
    }

    #[test]
    fn raise_if_still_open_alarms_only_when_open() {
        let door = make_door();
        assert_eq!(door.raise_if_still_open(), Ok(()));

        door.unlock().unwrap();
        assert_eq!(
            door.raise_if_still_open(),
            Err(DoorError::Alarm { timeout_secs: 4 })
        );
        // The alarm does not auto-lock.
        assert!(door.is_open());
    }

    #[test]
    fn watch_waits_for_door_timeout() {
        let door = make_door();
        let mut timer = Timer::with_sleeper(ManualClock::new());
        door.unlock().unwrap();

        let result = door.watch(&mut timer);
        assert_eq!(result, Err(DoorError::Alarm { timeout_secs: 4 }));
        assert_eq!(timer.sleeper().elapsed(), Duration::from_secs(4));
        assert_eq!(timer.last_duration(), Some(Duration::from_secs(4)));
    }

    #[test]
    fn watch_on_closed_door_is_quiet() {
        let door = make_door();
        let mut timer = Timer::with_sleeper(ManualClock::new());
        assert_eq!(door.watch(&mut timer), Ok(()));
        assert_eq!(timer.registrations(), 1);
    }
}
