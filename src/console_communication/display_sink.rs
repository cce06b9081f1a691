use crate::flight_control::{FlightPhase, InstrumentState, ProfileKind};

/// The readings shown on the dashboard after every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySample {
    pub phase: FlightPhase,
    pub indicated_mph: f64,
    pub altitude_agl: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl DisplaySample {
    pub fn new(instr: &InstrumentState, phase: FlightPhase) -> Self {
        Self {
            phase,
            indicated_mph: instr.mph(),
            altitude_agl: instr.altitude_agl(),
            pitch: instr.pitch(),
            roll: instr.roll(),
        }
    }
}

/// Consumer of the per-tick samples. Implementations must never block the tick loop.
pub trait DisplaySink: Send {
    fn push(&self, sample: &DisplaySample);
    fn attempt_started(&self, attempt: u32, profile: ProfileKind);
}
