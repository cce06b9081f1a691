use strum_macros::{Display, EnumIter};

/// Named segments of a flight plan.
///
/// `Turn`, `LongitudeAlign` and `Descent` may occur several times in one plan, every other phase
/// at most once.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, EnumIter)]
pub enum FlightPhase {
    Idle,
    GroundRoll,
    Rotate,
    InitialClimb,
    GearRetract,
    ClimbToAltitude,
    LevelOff,
    Turn,
    Cruise,
    LongitudeAlign,
    Descent,
    Approach,
    Flare,
    ShortFinal,
    Touchdown,
    RolloutBrake,
}

impl FlightPhase {
    pub fn may_repeat(self) -> bool {
        matches!(self, FlightPhase::Turn | FlightPhase::LongitudeAlign | FlightPhase::Descent)
    }

    /// Whether standing still on the ground means the simulator respawned the aircraft.
    ///
    /// `Idle` and `GroundRoll` are exempt: an aircraft waiting for or starting its takeoff roll
    /// is indistinguishable from a respawned one, and checking there would restart every tick.
    pub fn detects_respawn(self) -> bool { !matches!(self, FlightPhase::Idle | FlightPhase::GroundRoll) }
}
