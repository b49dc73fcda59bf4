use tracing::warn;

use super::timed::TimedDoor;
use crate::error::DoorError;
use crate::timer::TimerClient;

/// Binds a [`TimedDoor`] to the [`TimerClient`] capability.
///
/// Holds a plain borrow of the door, so it can never outlive it.
#[derive(Debug, Clone, Copy)]
pub struct DoorTimerAdapter<'d> {
    door: &'d TimedDoor,
}

impl<'d> DoorTimerAdapter<'d> {
    pub fn new(door: &'d TimedDoor) -> Self {
        Self { door }
    }

    pub fn door(&self) -> &'d TimedDoor {
        self.door
    }
}

impl TimerClient for DoorTimerAdapter<'_> {
    /// Raise [`DoorError::Alarm`] if the door is still open; otherwise do nothing.
    fn on_timeout(&self) -> Result<(), DoorError> {
        if self.door.is_open() {
            let timeout_secs = self.door.timeout_secs();
            warn!(timeout_secs, "door left open past its timeout");
            return Err(DoorError::Alarm { timeout_secs });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_door_timeout_is_silent() {
        let door = TimedDoor::new(2).unwrap();
        let adapter = DoorTimerAdapter::new(&door);
        assert_eq!(adapter.on_timeout(), Ok(()));
    }

    #[test]
    fn open_door_timeout_raises_alarm() {
        let door = TimedDoor::new(2).unwrap();
        door.unlock().unwrap();
        let adapter = DoorTimerAdapter::new(&door);
        assert_eq!(
            adapter.on_timeout(),
            Err(DoorError::Alarm { timeout_secs: 2 })
        );
    }

    #[test]
    fn adapter_sees_later_state_changes() {
        let door = TimedDoor::new(2).unwrap();
        let first = door.adapter();
        let second = DoorTimerAdapter::new(&door);

        door.unlock().unwrap();
        assert!(first.on_timeout().unwrap_err().is_alarm());
        assert!(second.on_timeout().unwrap_err().is_alarm());

        door.lock().unwrap();
        assert_eq!(first.on_timeout(), Ok(()));
        assert!(std::ptr::eq(first.door(), &door));
    }
}
