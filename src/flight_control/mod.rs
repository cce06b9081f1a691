mod alignment;
pub(crate) mod common;
mod control_state;
mod flight_phase;
mod instrument_state;
mod phase_machine;
mod phase_plan;
mod profile;

#[cfg(test)]
mod tests;

pub use alignment::{AlignmentSchedule, AlignmentStatus, GainBand};
pub use control_state::ControlState;
pub use flight_phase::FlightPhase;
pub use instrument_state::InstrumentState;
pub use phase_machine::FlightPhaseMachine;
pub use phase_plan::{
    AglBand, AglSchedule, EntryAction, ExitPredicate, HeadingRef, PhaseLaw, PhaseStep,
    PitchToggle,
};
pub use profile::{AircraftProfile, ControlGains, ProfileKind, RespawnThresholds};
