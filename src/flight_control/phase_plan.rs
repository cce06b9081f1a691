use super::flight_phase::FlightPhase;

/// Heading a law or predicate refers to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeadingRef {
    /// Heading captured when the takeoff rotation started.
    Takeoff,
    /// The takeoff heading turned around by 180°.
    Reciprocal,
    /// A fixed true heading, e.g. taken from the airport registry.
    Fixed(f64),
}

/// One-shot control mutations performed when a step becomes active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryAction {
    /// Same level on all four throttle levers.
    Throttles(f32),
    /// Individual levels for levers 1 to 4.
    ThrottleLevers([f32; 4]),
    Elevator(f32),
    Aileron(f32),
    Rudder(f32),
    NoseSteer(f32),
    GearDown(bool),
    /// Wheel, left and right brake together.
    Brakes(f32),
    Flaps(f32),
    SpeedBrake(f32),
    CaptureTakeoffHeading,
    ArmLongitudeAlignment,
}

/// Elevator set-point used while the altitude above ground exceeds `above_agl`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AglBand {
    pub above_agl: f64,
    pub elevator: f64,
    pub throttle: Option<f32>,
}

/// Altitude-banded elevator set-points, highest band first, with a set-point for the
/// lowest band (below every `above_agl`).
#[derive(Debug, Clone, PartialEq)]
pub struct AglSchedule {
    bands: Vec<AglBand>,
    ground: AglBand,
}

impl AglSchedule {
    pub fn new(bands: Vec<AglBand>, ground_elevator: f64, ground_throttle: Option<f32>) -> Self {
        let mut sorted = bands;
        sorted.sort_by(|a, b| b.above_agl.total_cmp(&a.above_agl));
        Self {
            bands: sorted,
            ground: AglBand { above_agl: f64::NEG_INFINITY, elevator: ground_elevator, throttle: ground_throttle },
        }
    }

    /// Returns the band responsible for `agl`.
    pub fn select(&self, agl: f64) -> &AglBand {
        self.bands.iter().find(|b| agl > b.above_agl).unwrap_or(&self.ground)
    }

    #[allow(dead_code)]
    pub fn bands(&self) -> &[AglBand] { &self.bands }
}

/// Feedback law applied on every tick of a step.
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseLaw {
    /// Leaves the controls as they are.
    Hold,
    /// Banks towards `heading` proportionally to the heading error.
    BankToHeading { heading: HeadingRef, elevator: f64 },
    /// Holds a constant bank angle, negative banks left.
    FixedBank { roll: f64, elevator: f64 },
    /// Roll damper, plus pitch damper and rudder heading hold if requested.
    Dampers { pitch: bool, heading: Option<HeadingRef> },
    /// Roll damper and altitude-banded elevator, with optional rudder heading hold.
    ElevatorBands { schedule: AglSchedule, heading: Option<HeadingRef> },
    /// Gain-scheduled rudder onto the profile's alignment longitude, pitch and roll damped.
    AlignLongitude { course: HeadingRef },
    /// Bank-to-heading with elevator and throttle from an altitude-banded flare schedule.
    FlareBands { heading: HeadingRef, schedule: AglSchedule },
    /// Rudder-only heading hold on the ground with a roll damper.
    RolloutSteer { heading: HeadingRef, rudder_gain: f64 },
    /// Steers roll with asymmetric thrust: levers 1 and 2 get `high` while banked left, levers
    /// 3 and 4 otherwise, the other pair gets `low`.
    DifferentialThrust { high: f32, low: f32 },
    /// Fixed aileron deflection against the side `roll` is on. Level exactly on `roll` keeps
    /// the last command. `pitch` adds the same two-point control on the elevator around level.
    BangBangBank { roll: f64, aileron: f64, pitch: Option<PitchToggle> },
}

/// Two-point elevator: `nose_low` while the pitch is negative, `nose_high` otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchToggle {
    pub nose_low: f64,
    pub nose_high: f64,
}

/// Threshold test deciding when a step is finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExitPredicate {
    Always,
    Never,
    KiasAtLeast(f64),
    KiasAtMost(f64),
    AglAtLeast(f64),
    AglAtMost(f64),
    PitchAtMost(f64),
    RollAtLeast(f64),
    /// Raw true heading, without wrapping around north.
    HeadingAtMost(f64),
    HeadingWithin { heading: HeadingRef, tolerance: f64 },
    LatitudeAtLeast(f64),
    LatitudeAtMost(f64),
    IndicatedMphAtMost(f64),
    LongitudeAligned,
}

/// A single entry of a flight plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseStep {
    phase: FlightPhase,
    narration: &'static str,
    entry: Vec<EntryAction>,
    law: PhaseLaw,
    exit: ExitPredicate,
}

impl PhaseStep {
    pub fn new(phase: FlightPhase, narration: &'static str) -> Self {
        Self { phase, narration, entry: Vec::new(), law: PhaseLaw::Hold, exit: ExitPredicate::Never }
    }

    #[must_use]
    pub fn on_entry(mut self, actions: impl IntoIterator<Item = EntryAction>) -> Self {
        self.entry.extend(actions);
        self
    }

    #[must_use]
    pub fn with_law(mut self, law: PhaseLaw) -> Self {
        self.law = law;
        self
    }

    #[must_use]
    pub fn until(mut self, exit: ExitPredicate) -> Self {
        self.exit = exit;
        self
    }

    pub fn phase(&self) -> FlightPhase { self.phase }
    pub fn narration(&self) -> &'static str { self.narration }
    pub fn entry(&self) -> &[EntryAction] { &self.entry }
    pub fn law(&self) -> &PhaseLaw { &self.law }
    pub fn exit(&self) -> ExitPredicate { self.exit }
}
