use std::fmt;

use serde::Serialize;

use crate::error::DoorError;

/// The two states a door can be in.
///
/// Closed --unlock--> Open --lock--> Closed. A timeout firing while Open
/// raises an alarm but does not change the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DoorState {
    Closed,
    Open,
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoorState::Closed => write!(f, "CLOSED"),
            DoorState::Open => write!(f, "OPEN"),
        }
    }
}

/// A request to move the door between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorAction {
    Unlock,
    Lock,
}

impl DoorAction {
    /// The error reported when this action is attempted from the wrong state.
    pub fn refusal(self) -> DoorError {
        match self {
            DoorAction::Unlock => DoorError::AlreadyOpen,
            DoorAction::Lock => DoorError::AlreadyClosed,
        }
    }
}

impl DoorState {
    pub fn from_open(open: bool) -> Self {
        if open { DoorState::Open } else { DoorState::Closed }
    }

    pub fn is_open(self) -> bool {
        self == DoorState::Open
    }

    /// Compute the state reached by applying `action`, or the precondition
    /// error if the action is not allowed from this state.
    pub fn apply(self, action: DoorAction) -> Result<DoorState, DoorError> {
        match (self, action) {
            (DoorState::Closed, DoorAction::Unlock) => Ok(DoorState::Open),
            (DoorState::Open, DoorAction::Lock) => Ok(DoorState::Closed),
            (_, action) => Err(action.refusal()),
        }
    }
}
