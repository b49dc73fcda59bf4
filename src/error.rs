//! Error taxonomy for door operations and timer callbacks.
//!
//! [`DoorError`] covers the two lock/unlock precondition failures, the
//! alarm raised when a timeout finds the door still open, and a rejected
//! zero timeout at construction.

use thiserror::Error;

/// Errors surfaced by [`TimedDoor`](crate::door::TimedDoor) and propagated
/// through [`Timer::register_client`](crate::timer::Timer::register_client).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DoorError {
    /// `unlock()` was called on a door that is already open.
    #[error("door is already open")]
    AlreadyOpen,

    /// `lock()` was called on a door that is already closed.
    #[error("door is already closed")]
    AlreadyClosed,

    /// A timeout fired while the door was still open.
    #[error("door left open too long (timeout {timeout_secs}s)")]
    Alarm { timeout_secs: u64 },

    /// Doors need a timeout of at least one second.
    #[error("invalid door timeout: {0}s (must be greater than zero)")]
    InvalidTimeout(u64),
}

impl DoorError {
    /// True for the domain alarm, false for misuse of the lock/unlock API.
    pub fn is_alarm(&self) -> bool {
        matches!(self, DoorError::Alarm { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alarm_display() {
        let err = DoorError::Alarm { timeout_secs: 4 };
        assert_eq!(err.to_string(), "door left open too long (timeout 4s)");
    }

    #[test]
    fn precondition_display() {
        assert_eq!(DoorError::AlreadyOpen.to_string(), "door is already open");
        assert_eq!(
            DoorError::AlreadyClosed.to_string(),
            "door is already closed"
        );
    }

    #[test]
    fn only_alarm_is_alarm() {
        assert!(DoorError::Alarm { timeout_secs: 1 }.is_alarm());
        assert!(!DoorError::AlreadyOpen.is_alarm());
        assert!(!DoorError::AlreadyClosed.is_alarm());
        assert!(!DoorError::InvalidTimeout(0).is_alarm());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DoorError>();
    }
}
