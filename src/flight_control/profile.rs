use super::{
    alignment::{AlignmentSchedule, GainBand},
    common::geodetic::LatLon,
    flight_phase::FlightPhase,
    phase_plan::{
        AglBand, AglSchedule, EntryAction, ExitPredicate, HeadingRef, PhaseLaw, PhaseStep,
        PitchToggle,
    },
};
use crate::airport;
use crate::sim_link::CommandLayout;
use crate::{fatal, warn};
use itertools::Itertools;
use strum_macros::{Display, EnumIter};

/// The flight profiles the autopilot knows how to fly.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum ProfileKind {
    /// Takeoff and climb straight out to 2000 ft, then hold.
    StraightOut,
    /// Takeoff, climb, downwind leg, final turn and full landing with flaps and speed brakes.
    Circuit,
    /// Takeoff, climb, downwind leg and an approach that realigns onto the runway longitude.
    LongitudeApproach,
    /// Four-engine aircraft steering its climb with differential thrust, a left half turn, a
    /// wave down to 700 ft and back up, then an engine-out glide and a full power pull-up.
    XWing,
}

impl From<&str> for ProfileKind {
    fn from(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "straight-out" | "base" => ProfileKind::StraightOut,
            "circuit" | "landing" => ProfileKind::Circuit,
            "longitude-approach" | "align" => ProfileKind::LongitudeApproach,
            "x-wing" | "xwing" => ProfileKind::XWing,
            other => {
                warn!("Unknown profile '{other}', falling back to {}", ProfileKind::Circuit);
                ProfileKind::Circuit
            }
        }
    }
}

/// Proportional gains shared by all feedback laws. Every law divides its error by the gain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlGains {
    /// Degrees of roll error per unit of aileron.
    pub roll: f64,
    /// Degrees of pitch per unit of elevator for the pitch damper.
    pub pitch: f64,
    /// Degrees of heading error per unit of rudder for the rudder heading hold.
    pub heading_rudder: f64,
    /// Degrees of bank per unit of elevator removed while turning.
    pub bank_pitch_comp: f64,
    /// Largest bank angle commanded by a bank-to-heading law.
    pub max_bank: f64,
}

impl Default for ControlGains {
    fn default() -> Self {
        Self { roll: 50.0, pitch: 10.0, heading_rudder: 10.0, bank_pitch_comp: 100.0, max_bank: 30.0 }
    }
}

/// Heuristic recognising a simulator respawn: standing still close to the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RespawnThresholds {
    pub max_ground_speed_mph: f64,
    pub max_agl: f64,
}

impl Default for RespawnThresholds {
    fn default() -> Self { Self { max_ground_speed_mph: 1.0, max_agl: 50.0 } }
}

/// Everything needed to fly one profile: gains, thresholds, the ordered plan and the command
/// layout the simulator should receive.
#[derive(Debug, Clone)]
pub struct AircraftProfile {
    kind: ProfileKind,
    gains: ControlGains,
    respawn: RespawnThresholds,
    alignment: Option<AlignmentSchedule>,
    layout: CommandLayout,
    plan: Vec<PhaseStep>,
}

impl AircraftProfile {
    /// Runway the circuit profiles take off from and land on.
    const HOME_RUNWAY: (&'static str, &'static str) = ("KSEA", "16L");
    /// Latitude where the circuit's downwind leg ends.
    const CIRCUIT_DOWNWIND_LAT: f64 = 47.51;
    /// Latitude where the longitude approach's downwind leg ends.
    const APPROACH_DOWNWIND_LAT: f64 = 47.59;
    /// Latitude where the longitude approach stops tracking the runway heading and descends.
    const APPROACH_FINAL_LAT: f64 = 47.54;

    const ALIGNMENT_BANDS: [GainBand; 3] = [
        GainBand { min_error: 0.003, gain: 6.0 },
        GainBand { min_error: 0.0005, gain: 12.0 },
        GainBand { min_error: 0.0, gain: 20.0 },
    ];
    const ALIGNMENT_TOLERANCE: f64 = 0.0001;
    const ALIGNMENT_CAPTURE_LIMIT: f64 = 0.5;

    pub fn new(kind: ProfileKind) -> Self {
        let (plan, layout, alignment) = match kind {
            ProfileKind::StraightOut => (Self::straight_out_plan(), CommandLayout::Basic, None),
            ProfileKind::Circuit => (Self::circuit_plan(), CommandLayout::HighLift, None),
            ProfileKind::LongitudeApproach => {
                let home = Self::home_threshold();
                let schedule = AlignmentSchedule::new(
                    home.lon(),
                    Self::ALIGNMENT_BANDS,
                    Self::ALIGNMENT_TOLERANCE,
                    Self::ALIGNMENT_CAPTURE_LIMIT,
                );
                (Self::longitude_approach_plan(), CommandLayout::Basic, Some(schedule))
            }
            ProfileKind::XWing => (Self::x_wing_plan(), CommandLayout::Basic, None),
        };
        Self::with_plan(kind, plan, layout, alignment)
    }

    pub fn kind(&self) -> ProfileKind { self.kind }
    pub fn gains(&self) -> &ControlGains { &self.gains }
    pub fn respawn(&self) -> &RespawnThresholds { &self.respawn }
    pub fn alignment(&self) -> Option<&AlignmentSchedule> { self.alignment.as_ref() }
    pub fn layout(&self) -> CommandLayout { self.layout }
    pub fn plan(&self) -> &[PhaseStep] { &self.plan }

    /// Builds a profile around a custom plan, keeping the default gains.
    pub fn with_plan(
        kind: ProfileKind,
        plan: Vec<PhaseStep>,
        layout: CommandLayout,
        alignment: Option<AlignmentSchedule>,
    ) -> Self {
        let profile = Self {
            kind,
            gains: ControlGains::default(),
            respawn: RespawnThresholds::default(),
            alignment,
            layout,
            plan,
        };
        profile.validate();
        profile
    }

    fn home_threshold() -> LatLon {
        let (apt, rwy) = Self::HOME_RUNWAY;
        match airport::runway_location(apt, rwy) {
            Some(loc) => *loc.lat_lon(),
            None => fatal!("Home runway {apt} {rwy} missing from the airport registry"),
        }
    }

    fn validate(&self) {
        if self.plan.first().map(PhaseStep::phase) != Some(FlightPhase::Idle) {
            fatal!("Plan of {} must start in {}", self.kind, FlightPhase::Idle);
        }
        let counts = self.plan.iter().map(PhaseStep::phase).counts();
        for (phase, count) in counts {
            if count > 1 && !phase.may_repeat() {
                fatal!("Phase {phase} occurs {count} times in plan of {}", self.kind);
            }
        }
        let needs_alignment = self.plan.iter().any(|s| {
            s.exit() == ExitPredicate::LongitudeAligned
                || matches!(s.law(), PhaseLaw::AlignLongitude { .. })
        });
        if needs_alignment && self.alignment.is_none() {
            fatal!("Plan of {} aligns on a longitude but has no alignment schedule", self.kind);
        }
    }

    fn idle() -> PhaseStep {
        PhaseStep::new(FlightPhase::Idle, "waiting for the first telemetry").until(ExitPredicate::Always)
    }

    fn straight_out_plan() -> Vec<PhaseStep> {
        use EntryAction::*;
        vec![
            Self::idle(),
            PhaseStep::new(FlightPhase::GroundRoll, "applying full throttle")
                .on_entry([Throttles(1.0), Rudder(-0.0045), Aileron(-0.015)])
                .until(ExitPredicate::KiasAtLeast(160.0)),
            PhaseStep::new(FlightPhase::Rotate, "starting takeoff rotation")
                .on_entry([CaptureTakeoffHeading, Elevator(0.5)])
                .until(ExitPredicate::KiasAtLeast(180.0)),
            PhaseStep::new(FlightPhase::InitialClimb, "end of takeoff rotation")
                .on_entry([Elevator(0.3)])
                .until(ExitPredicate::AglAtLeast(100.0)),
            PhaseStep::new(FlightPhase::GearRetract, "raising landing gear")
                .on_entry([GearDown(false), Elevator(0.0)])
                .until(ExitPredicate::AglAtLeast(1000.0)),
            PhaseStep::new(FlightPhase::ClimbToAltitude, "reduce throttle and wait until 2000 feet")
                .on_entry([Throttles(0.4)])
                .until(ExitPredicate::AglAtLeast(2000.0)),
            PhaseStep::new(FlightPhase::LevelOff, "leveling off")
                .on_entry([Elevator(-0.2)])
                .until(ExitPredicate::PitchAtMost(0.0)),
            PhaseStep::new(FlightPhase::Cruise, "keep flying").on_entry([Elevator(0.0)]),
        ]
    }

    /// Touchdown set-points by altitude above ground, throttle cut below 250 ft.
    fn circuit_flare_schedule() -> AglSchedule {
        AglSchedule::new(
            vec![
                AglBand { above_agl: 250.0, elevator: 0.29, throttle: None },
                AglBand { above_agl: 120.0, elevator: 0.31, throttle: Some(0.0) },
                AglBand { above_agl: 60.0, elevator: 0.33, throttle: Some(0.0) },
                AglBand { above_agl: 2.0, elevator: 0.39, throttle: Some(0.0) },
            ],
            0.39,
            Some(0.0),
        )
    }

    fn circuit_plan() -> Vec<PhaseStep> {
        use EntryAction::*;
        use HeadingRef::{Reciprocal, Takeoff};
        let runway_hold = |elevator| PhaseLaw::BankToHeading { heading: Takeoff, elevator };
        let flare = PhaseLaw::FlareBands { heading: Takeoff, schedule: Self::circuit_flare_schedule() };
        vec![
            Self::idle(),
            PhaseStep::new(FlightPhase::GroundRoll, "apply full throttle and lower flaps partially")
                .on_entry([Throttles(1.0), Rudder(-0.005), Aileron(-0.015), Flaps(0.25), SpeedBrake(0.0)])
                .until(ExitPredicate::KiasAtLeast(160.0)),
            PhaseStep::new(FlightPhase::Rotate, "start takeoff rotation")
                .on_entry([CaptureTakeoffHeading])
                .with_law(runway_hold(0.5))
                .until(ExitPredicate::KiasAtLeast(180.0)),
            PhaseStep::new(FlightPhase::InitialClimb, "end takeoff rotation")
                .with_law(runway_hold(0.3))
                .until(ExitPredicate::AglAtLeast(100.0)),
            PhaseStep::new(FlightPhase::GearRetract, "raise landing gear")
                .on_entry([GearDown(false), Flaps(0.0)])
                .with_law(runway_hold(0.0))
                .until(ExitPredicate::AglAtLeast(1000.0)),
            PhaseStep::new(FlightPhase::ClimbToAltitude, "reduce throttle and wait until 2000 feet")
                .on_entry([Throttles(0.4)])
                .with_law(runway_hold(0.0))
                .until(ExitPredicate::AglAtLeast(2000.0)),
            PhaseStep::new(FlightPhase::LevelOff, "level off")
                .with_law(runway_hold(-0.2))
                .until(ExitPredicate::PitchAtMost(0.0)),
            PhaseStep::new(FlightPhase::Turn, "do a half turn")
                .with_law(PhaseLaw::FixedBank { roll: -30.0, elevator: 0.0 })
                .until(ExitPredicate::HeadingWithin { heading: Reciprocal, tolerance: 2.0 }),
            PhaseStep::new(FlightPhase::Cruise, "maintain heading")
                .with_law(PhaseLaw::BankToHeading { heading: Reciprocal, elevator: 0.0 })
                .until(ExitPredicate::LatitudeAtLeast(Self::CIRCUIT_DOWNWIND_LAT)),
            PhaseStep::new(FlightPhase::Turn, "apply flaps and turn onto final approach")
                .on_entry([Throttles(0.14), Flaps(0.4)])
                .with_law(PhaseLaw::FixedBank { roll: -29.0, elevator: -0.2 })
                .until(ExitPredicate::HeadingWithin { heading: Takeoff, tolerance: 2.0 }),
            PhaseStep::new(FlightPhase::Approach, "lower landing gears and descend to runway")
                .on_entry([GearDown(true), Flaps(0.6)])
                .with_law(runway_hold(0.0))
                .until(ExitPredicate::AglAtMost(300.0)),
            PhaseStep::new(FlightPhase::Flare, "start landing flare")
                .on_entry([Flaps(0.75)])
                .with_law(flare.clone())
                .until(ExitPredicate::AglAtMost(60.0)),
            PhaseStep::new(FlightPhase::ShortFinal, "wait for landing")
                .with_law(flare.clone())
                .until(ExitPredicate::AglAtMost(2.0)),
            PhaseStep::new(FlightPhase::Touchdown, "apply speed brakes")
                .on_entry([SpeedBrake(1.0)])
                .with_law(flare.clone())
                .until(ExitPredicate::KiasAtMost(120.0)),
            PhaseStep::new(FlightPhase::RolloutBrake, "apply wheel brakes")
                .on_entry([Brakes(1.0)])
                .with_law(flare),
        ]
    }

    fn longitude_approach_plan() -> Vec<PhaseStep> {
        use EntryAction::*;
        use HeadingRef::{Reciprocal, Takeoff};
        vec![
            Self::idle(),
            PhaseStep::new(FlightPhase::GroundRoll, "applying full throttle")
                .on_entry([GearDown(true), Throttles(1.0), Rudder(-0.0045), Aileron(-0.015)])
                .until(ExitPredicate::KiasAtLeast(160.0)),
            PhaseStep::new(FlightPhase::Rotate, "starting takeoff rotation")
                .on_entry([CaptureTakeoffHeading, Elevator(0.5)])
                .until(ExitPredicate::KiasAtLeast(180.0)),
            PhaseStep::new(FlightPhase::InitialClimb, "end of takeoff rotation")
                .on_entry([Elevator(0.3)])
                .until(ExitPredicate::AglAtLeast(100.0)),
            PhaseStep::new(FlightPhase::GearRetract, "raising landing gear")
                .on_entry([GearDown(false), Elevator(0.0)])
                .until(ExitPredicate::AglAtLeast(1000.0)),
            PhaseStep::new(FlightPhase::ClimbToAltitude, "reduce throttle and wait until 2000 feet")
                .on_entry([Throttles(0.4)])
                .until(ExitPredicate::AglAtLeast(2000.0)),
            PhaseStep::new(FlightPhase::LevelOff, "leveling off")
                .on_entry([Elevator(-0.2)])
                .until(ExitPredicate::PitchAtMost(0.0)),
            PhaseStep::new(FlightPhase::Turn, "do a half turn")
                .with_law(PhaseLaw::FixedBank { roll: -30.0, elevator: 0.0 })
                .until(ExitPredicate::HeadingWithin { heading: Reciprocal, tolerance: 2.0 }),
            PhaseStep::new(FlightPhase::Cruise, "maintain heading")
                .on_entry([Elevator(0.0)])
                .with_law(PhaseLaw::Dampers { pitch: true, heading: None })
                .until(ExitPredicate::LatitudeAtLeast(Self::APPROACH_DOWNWIND_LAT)),
            PhaseStep::new(FlightPhase::Turn, "turn back towards the runway")
                .with_law(PhaseLaw::FixedBank { roll: -30.0, elevator: 0.0 })
                .until(ExitPredicate::HeadingWithin { heading: Takeoff, tolerance: 2.0 }),
            PhaseStep::new(FlightPhase::LongitudeAlign, "engines idle, align with runway longitude")
                .on_entry([Throttles(0.0), ArmLongitudeAlignment])
                .with_law(PhaseLaw::AlignLongitude { course: Takeoff })
                .until(ExitPredicate::LongitudeAligned),
            PhaseStep::new(FlightPhase::Descent, "descend to 3000 feet")
                .with_law(PhaseLaw::ElevatorBands {
                    schedule: AglSchedule::new(
                        vec![AglBand { above_agl: 4000.0, elevator: -0.35, throttle: None }],
                        -0.25,
                        None,
                    ),
                    heading: None,
                })
                .until(ExitPredicate::AglAtMost(3000.0)),
            PhaseStep::new(FlightPhase::Approach, "track the runway heading")
                .with_law(PhaseLaw::Dampers { pitch: true, heading: Some(Takeoff) })
                .until(ExitPredicate::LatitudeAtMost(Self::APPROACH_FINAL_LAT)),
            PhaseStep::new(FlightPhase::Descent, "lower landing gear, descend to 2200 feet")
                .on_entry([NoseSteer(-0.5), GearDown(true)])
                .with_law(PhaseLaw::ElevatorBands {
                    schedule: AglSchedule::new(
                        vec![AglBand { above_agl: 2400.0, elevator: -0.25, throttle: None }],
                        -0.15,
                        None,
                    ),
                    heading: Some(Takeoff),
                })
                .until(ExitPredicate::AglAtMost(2200.0)),
            PhaseStep::new(FlightPhase::LongitudeAlign, "realign with runway longitude")
                .on_entry([ArmLongitudeAlignment])
                .with_law(PhaseLaw::AlignLongitude { course: Takeoff })
                .until(ExitPredicate::LongitudeAligned),
            PhaseStep::new(FlightPhase::Flare, "stabilize pitch down to 180 feet")
                .on_entry([Elevator(0.125)])
                .with_law(PhaseLaw::Dampers { pitch: false, heading: Some(Takeoff) })
                .until(ExitPredicate::AglAtMost(180.0)),
            PhaseStep::new(FlightPhase::ShortFinal, "landing flare")
                .with_law(PhaseLaw::ElevatorBands {
                    schedule: AglSchedule::new(
                        vec![
                            AglBand { above_agl: 120.0, elevator: 0.15, throttle: None },
                            AglBand { above_agl: 70.0, elevator: 0.12, throttle: None },
                        ],
                        0.1,
                        None,
                    ),
                    heading: Some(Takeoff),
                })
                .until(ExitPredicate::AglAtMost(10.0)),
            PhaseStep::new(FlightPhase::Touchdown, "touchdown, full brakes")
                .on_entry([Elevator(-1.0), NoseSteer(-1.0), Brakes(1.0)])
                .with_law(PhaseLaw::RolloutSteer { heading: Takeoff, rudder_gain: 5.0 })
                .until(ExitPredicate::IndicatedMphAtMost(225.0)),
            PhaseStep::new(FlightPhase::RolloutBrake, "rollout")
                .with_law(PhaseLaw::RolloutSteer { heading: Takeoff, rudder_gain: 5.0 }),
        ]
    }

    /// Levers 1 and 2 against levers 3 and 4 while climbing out.
    const X_WING_THRUST_SPLIT: PhaseLaw = PhaseLaw::DifferentialThrust { high: 1.0, low: 0.9 };

    fn x_wing_plan() -> Vec<PhaseStep> {
        use EntryAction::*;
        let wings_level = |pitch| PhaseLaw::BangBangBank { roll: 0.0, aileron: 0.1, pitch };
        vec![
            Self::idle(),
            PhaseStep::new(FlightPhase::GroundRoll, "applying full throttle")
                .on_entry([Throttles(1.0), Rudder(-0.0005)])
                .until(ExitPredicate::KiasAtLeast(160.0)),
            PhaseStep::new(FlightPhase::Rotate, "starting takeoff rotation")
                .on_entry([Elevator(0.5)])
                .until(ExitPredicate::KiasAtLeast(200.0)),
            PhaseStep::new(FlightPhase::InitialClimb, "end of takeoff rotation")
                .until(ExitPredicate::AglAtLeast(100.0)),
            PhaseStep::new(FlightPhase::GearRetract, "raising landing gear, thrust steers the roll")
                .on_entry([GearDown(false), Elevator(0.4), Rudder(-0.05), Aileron(0.2)])
                .with_law(Self::X_WING_THRUST_SPLIT)
                .until(ExitPredicate::AglAtLeast(1125.0)),
            PhaseStep::new(FlightPhase::LevelOff, "level off")
                .on_entry([Rudder(0.0), Throttles(0.7), Elevator(0.1)])
                .until(ExitPredicate::PitchAtMost(7.0)),
            PhaseStep::new(FlightPhase::Cruise, "full power until the nose settles")
                .on_entry([Elevator(0.3), Throttles(1.0)])
                .with_law(Self::X_WING_THRUST_SPLIT)
                .until(ExitPredicate::PitchAtMost(6.0)),
            PhaseStep::new(FlightPhase::Turn, "start of the half turn, 30 degrees left bank")
                .on_entry([Throttles(0.5), Elevator(0.6), Rudder(-0.2)])
                .with_law(PhaseLaw::BangBangBank { roll: -30.0, aileron: 0.2, pitch: None })
                .until(ExitPredicate::HeadingAtMost(35.0)),
            PhaseStep::new(FlightPhase::Turn, "stabilizing manoeuvre towards north")
                .on_entry([Rudder(0.0), Aileron(0.08), Elevator(0.3)])
                .until(ExitPredicate::HeadingWithin { heading: HeadingRef::Fixed(0.0), tolerance: 2.0 }),
            PhaseStep::new(FlightPhase::Descent, "nose down")
                .on_entry([Elevator(-0.5), Aileron(0.12)])
                .until(ExitPredicate::PitchAtMost(0.0)),
            PhaseStep::new(FlightPhase::Turn, "rolling wings level")
                .on_entry([Elevator(-0.05), Aileron(0.3)])
                .until(ExitPredicate::RollAtLeast(0.0)),
            PhaseStep::new(FlightPhase::Descent, "stabilize and descend to 700 feet")
                .with_law(wings_level(None))
                .until(ExitPredicate::AglAtMost(700.0)),
            PhaseStep::new(FlightPhase::ClimbToAltitude, "climb back to 900 feet")
                .with_law(wings_level(Some(PitchToggle { nose_low: 0.3, nose_high: -0.1 })))
                .until(ExitPredicate::AglAtLeast(900.0)),
            PhaseStep::new(FlightPhase::Approach, "engines off, glide down to 215 feet")
                .on_entry([Throttles(0.0)])
                .with_law(wings_level(None))
                .until(ExitPredicate::AglAtMost(215.0)),
            PhaseStep::new(FlightPhase::Flare, "full power and full up elevator")
                .on_entry([Elevator(1.0), Throttles(1.0)])
                .until(ExitPredicate::AglAtMost(100.0)),
            PhaseStep::new(FlightPhase::ShortFinal, "hold 100 feet")
                .with_law(PhaseLaw::ElevatorBands {
                    schedule: AglSchedule::new(
                        vec![AglBand { above_agl: 100.0, elevator: -0.1, throttle: None }],
                        0.2,
                        None,
                    ),
                    heading: None,
                }),
        ]
    }
}
