use crate::flight_control::ControlState;
use strum_macros::Display;

/// Why the current attempt is abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RestartCause {
    /// The aircraft stands still on the ground after having taken off.
    SimulatorReset,
    NetworkFailure,
}

/// Outcome of a single tick of the attempt loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickSignal {
    /// The commands sent during this tick.
    Continue(ControlState),
    Restart(RestartCause),
}
