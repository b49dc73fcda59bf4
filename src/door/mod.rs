mod adapter;
mod state;
mod timed;

pub use adapter::DoorTimerAdapter;
pub use state::{DoorAction, DoorState};
pub use timed::TimedDoor;
