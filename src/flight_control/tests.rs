use super::{
    AglBand, AglSchedule, AircraftProfile, AlignmentSchedule, AlignmentStatus, ControlState,
    EntryAction, ExitPredicate, FlightPhase, FlightPhaseMachine, GainBand, HeadingRef,
    InstrumentState, PhaseLaw, PhaseStep, PitchToggle, ProfileKind,
};
use crate::sim_link::CommandLayout;
use itertools::Itertools;
use rand::Rng;
use strum::IntoEnumIterator;

const EPS: f64 = 1e-6;
const TARGET_LON: f64 = -122.3;
const KSEA_16L_LON: f64 = -122.307_752_22;

fn instruments(kias: f64, agl: f64, pitch: f64, roll: f64, heading: f64) -> InstrumentState {
    let mut instr = InstrumentState::default();
    let mph = kias * 1.150_779;
    instr.apply_speeds(&[kias, kias, kias, kias, -999.0, mph, mph, mph]);
    instr.apply_attitude(&[pitch, roll, heading, heading - 15.0, 0.0, 0.0, 0.0, 0.0]);
    instr.apply_position(&[47.46, -122.31, agl + 433.0, agl, 0.0, agl + 433.0, 0.0, 0.0]);
    instr
}

fn at_position(mut instr: InstrumentState, lat: f64, lon: f64) -> InstrumentState {
    let agl = instr.altitude_agl();
    instr.apply_position(&[lat, lon, agl + 433.0, agl, 0.0, agl + 433.0, 0.0, 0.0]);
    instr
}

fn idle() -> PhaseStep { PhaseStep::new(FlightPhase::Idle, "idle").until(ExitPredicate::Always) }

fn test_schedule() -> AlignmentSchedule {
    AlignmentSchedule::new(
        TARGET_LON,
        [
            GainBand { min_error: 0.003, gain: 6.0 },
            GainBand { min_error: 0.0005, gain: 12.0 },
            GainBand { min_error: 0.0, gain: 20.0 },
        ],
        0.0001,
        0.5,
    )
}

fn machine_for(plan: Vec<PhaseStep>) -> FlightPhaseMachine {
    let profile =
        AircraftProfile::with_plan(ProfileKind::Circuit, plan, CommandLayout::Basic, Some(test_schedule()));
    FlightPhaseMachine::new(profile)
}

/// Feeds every snapshot once and records the active phase after each tick.
fn fly(
    machine: &mut FlightPhaseMachine,
    controls: &mut ControlState,
    ticks: &[InstrumentState],
) -> Vec<FlightPhase> {
    ticks
        .iter()
        .map(|instr| {
            machine.step(instr, controls);
            machine.phase()
        })
        .collect()
}

#[test]
fn test_straight_out_phase_order() {
    let mut machine = FlightPhaseMachine::new(AircraftProfile::new(ProfileKind::StraightOut));
    let mut controls = ControlState::default();
    let ticks = [
        instruments(0.0, 0.0, 0.0, 0.0, 163.0),
        instruments(0.0, 0.0, 0.0, 0.0, 163.0),
        instruments(120.0, 0.0, 0.0, 0.0, 163.0),
        instruments(159.9, 0.0, 0.0, 0.0, 163.0),
        instruments(160.0, 0.0, 2.0, 0.0, 163.0),
        instruments(175.0, 5.0, 6.0, 0.0, 163.0),
        instruments(180.0, 40.0, 9.0, 0.0, 163.0),
        instruments(185.0, 99.0, 10.0, 0.0, 163.0),
        instruments(190.0, 100.0, 10.0, 0.0, 163.0),
        instruments(200.0, 600.0, 8.0, 0.0, 163.0),
        instruments(210.0, 1000.0, 8.0, 0.0, 163.0),
        instruments(220.0, 1999.0, 6.0, 0.0, 163.0),
        instruments(220.0, 2000.0, 6.0, 0.0, 163.0),
        instruments(220.0, 2100.0, 3.0, 0.0, 163.0),
        instruments(220.0, 2150.0, 0.0, 0.0, 163.0),
        instruments(220.0, 2150.0, -1.0, 0.0, 163.0),
    ];
    let phases = fly(&mut machine, &mut controls, &ticks);
    assert_eq!(phases[0], FlightPhase::Idle);
    assert_eq!(phases[1], FlightPhase::GroundRoll);
    assert_eq!(phases[3], FlightPhase::GroundRoll, "159.9 kt must not rotate");
    assert_eq!(phases[4], FlightPhase::Rotate);
    assert_eq!(phases[7], FlightPhase::InitialClimb, "99 ft must not raise the gear");
    let order = phases.into_iter().dedup().collect::<Vec<_>>();
    assert_eq!(
        order,
        vec![
            FlightPhase::Idle,
            FlightPhase::GroundRoll,
            FlightPhase::Rotate,
            FlightPhase::InitialClimb,
            FlightPhase::GearRetract,
            FlightPhase::ClimbToAltitude,
            FlightPhase::LevelOff,
            FlightPhase::Cruise,
        ]
    );
    assert!(!controls.gear_down);
    assert!(controls.throttle.iter().all(|t| (t - 0.4).abs() < 1e-6));
    assert!(controls.elevator.abs() < 1e-6);
}

#[test]
fn test_at_most_one_transition_per_tick() {
    for kind in ProfileKind::iter() {
        let profile = AircraftProfile::new(kind);
        let expected = profile.plan().iter().map(PhaseStep::phase).collect::<Vec<_>>();
        let mut machine = FlightPhaseMachine::new(profile);
        let mut controls = ControlState::default();
        let mut seen = vec![machine.phase()];
        let mut last_index = machine.step_index();
        for tick in 0..3 * expected.len() {
            // alternate between two extreme snapshots so every predicate holds at some point
            let instr = if tick % 2 == 0 {
                at_position(instruments(500.0, 5000.0, -5.0, 0.0, 0.0), 47.7, KSEA_16L_LON)
            } else {
                at_position(instruments(0.0, 0.0, -5.0, 0.0, 180.0), 47.3, KSEA_16L_LON)
            };
            let transition = machine.step(&instr, &mut controls);
            let index = machine.step_index();
            assert!(index - last_index <= 1, "{kind} skipped a step");
            assert_eq!(transition.is_some(), index != last_index);
            if transition.is_some() {
                seen.push(machine.phase());
            }
            last_index = index;
        }
        assert_eq!(machine.step_index(), expected.len() - 1, "{kind} did not reach its last step");
        assert_eq!(seen, expected);
    }
}

#[test]
fn test_idle_holds_for_exactly_one_tick() {
    let mut machine = FlightPhaseMachine::new(AircraftProfile::new(ProfileKind::Circuit));
    let mut controls = ControlState::default();
    let standing = instruments(0.0, 0.0, 0.0, 0.0, 163.0);
    assert_eq!(machine.step(&standing, &mut controls), None);
    assert_eq!(machine.phase(), FlightPhase::Idle);
    assert_eq!(controls, ControlState::default());
    assert_eq!(machine.step(&standing, &mut controls), Some(FlightPhase::GroundRoll));
    assert!((controls.flaps - 0.25).abs() < 1e-6);
    assert!(controls.throttle.iter().all(|t| (t - 1.0).abs() < 1e-6));
}

#[test]
fn test_controls_are_sticky() {
    let mut machine = FlightPhaseMachine::new(AircraftProfile::new(ProfileKind::StraightOut));
    let mut controls = ControlState::default();
    let ticks = [
        instruments(0.0, 0.0, 0.0, 0.0, 163.0),
        instruments(0.0, 0.0, 0.0, 0.0, 163.0),
        instruments(160.0, 0.0, 0.0, 0.0, 163.0),
        instruments(180.0, 20.0, 5.0, 0.0, 163.0),
    ];
    let phases = fly(&mut machine, &mut controls, &ticks);
    assert_eq!(phases.last(), Some(&FlightPhase::InitialClimb));
    // set in ground roll, never touched afterwards
    assert!(controls.throttle.iter().all(|t| (t - 1.0).abs() < 1e-6));
    assert!((controls.rudder + 0.0045).abs() < 1e-6);
    assert!((controls.aileron + 0.015).abs() < 1e-6);
    assert!((controls.elevator - 0.3).abs() < 1e-6);
    assert!(controls.gear_down);
}

#[test]
fn test_reset_returns_to_idle() {
    let mut machine = FlightPhaseMachine::new(AircraftProfile::new(ProfileKind::Circuit));
    let mut controls = ControlState::default();
    let standing = instruments(0.0, 0.0, 0.0, 0.0, 163.0);
    fly(&mut machine, &mut controls, &[standing, standing, instruments(170.0, 0.0, 0.0, 0.0, 163.0)]);
    assert_eq!(machine.phase(), FlightPhase::Rotate);
    assert_eq!(machine.takeoff_heading(), Some(163.0));
    machine.reset();
    assert_eq!(machine.phase(), FlightPhase::Idle);
    assert_eq!(machine.step_index(), 0);
    assert_eq!(machine.takeoff_heading(), None);
}

#[test]
fn test_turn_law() {
    let mut machine = machine_for(vec![
        idle(),
        PhaseStep::new(FlightPhase::Turn, "turn").with_law(PhaseLaw::FixedBank { roll: -30.0, elevator: 0.0 }),
    ]);
    let mut controls = ControlState::default();
    let instr = instruments(250.0, 2000.0, 0.0, 10.0, 90.0);
    fly(&mut machine, &mut controls, &[instr, instr]);
    assert_eq!(machine.phase(), FlightPhase::Turn);
    assert!((f64::from(controls.aileron) + 0.8).abs() < EPS);
    assert!((f64::from(controls.elevator) + 0.1).abs() < EPS);
}

#[test]
fn test_bank_to_heading_is_limited() {
    let mut machine = machine_for(vec![
        idle(),
        PhaseStep::new(FlightPhase::Rotate, "rotate")
            .on_entry([EntryAction::CaptureTakeoffHeading])
            .with_law(PhaseLaw::BankToHeading { heading: HeadingRef::Takeoff, elevator: 0.5 }),
    ]);
    let mut controls = ControlState::default();
    let on_course = instruments(170.0, 0.0, 0.0, 0.0, 160.0);
    fly(&mut machine, &mut controls, &[on_course, on_course]);
    assert_eq!(machine.takeoff_heading(), Some(160.0));
    assert!(controls.aileron.abs() < 1e-6);
    assert!((controls.elevator - 0.5).abs() < 1e-6);

    // 90° right of course asks for a left bank, clamped to the bank limit
    machine.step(&instruments(170.0, 0.0, 0.0, 0.0, 250.0), &mut controls);
    assert!((f64::from(controls.aileron) + 30.0 / 50.0).abs() < EPS);

    // 4° left of course with 10° right bank already applied
    machine.step(&instruments(170.0, 0.0, 0.0, 10.0, 156.0), &mut controls);
    assert!((f64::from(controls.aileron) - (4.0 - 10.0) / 50.0).abs() < EPS);
    assert!((f64::from(controls.elevator) - (0.5 - 0.1)).abs() < EPS);
}

#[test]
fn test_heading_hold_captures_takeoff_heading_lazily() {
    let mut machine = machine_for(vec![
        idle(),
        PhaseStep::new(FlightPhase::Cruise, "cruise")
            .with_law(PhaseLaw::Dampers { pitch: true, heading: Some(HeadingRef::Reciprocal) }),
    ]);
    let mut controls = ControlState::default();
    let instr = instruments(250.0, 2000.0, 5.0, -10.0, 340.0);
    fly(&mut machine, &mut controls, &[instr, instr]);
    assert_eq!(machine.takeoff_heading(), Some(340.0));
    // flying the takeoff heading is 180° off the reciprocal, full rudder
    assert!((controls.rudder.abs() - 1.0).abs() < 1e-6);
    assert!((f64::from(controls.aileron) - 10.0 / 50.0).abs() < EPS);
    assert!((f64::from(controls.elevator) + 0.5).abs() < EPS);

    machine.step(&instruments(250.0, 2000.0, 0.0, 0.0, 165.0), &mut controls);
    assert!((f64::from(controls.rudder) + 0.5).abs() < EPS);
}

#[test]
fn test_flare_bands_by_altitude() {
    let schedule = AglSchedule::new(
        vec![
            AglBand { above_agl: 60.0, elevator: 0.33, throttle: Some(0.0) },
            AglBand { above_agl: 250.0, elevator: 0.29, throttle: None },
            AglBand { above_agl: 2.0, elevator: 0.39, throttle: Some(0.0) },
            AglBand { above_agl: 120.0, elevator: 0.31, throttle: Some(0.0) },
        ],
        0.39,
        Some(0.0),
    );
    let ordered = schedule.bands().iter().map(|b| b.above_agl).collect::<Vec<_>>();
    assert_eq!(ordered, vec![250.0, 120.0, 60.0, 2.0]);
    let expected = [(300.0, 0.29), (250.0, 0.31), (200.0, 0.31), (90.0, 0.33), (30.0, 0.39), (2.0, 0.39), (0.0, 0.39)];
    for (agl, elevator) in expected {
        assert!((schedule.select(agl).elevator - elevator).abs() < EPS, "wrong band at {agl} ft");
    }
    assert_eq!(schedule.select(300.0).throttle, None);
    assert_eq!(schedule.select(121.0).throttle, Some(0.0));

    let mut machine = machine_for(vec![
        idle(),
        PhaseStep::new(FlightPhase::Flare, "flare")
            .on_entry([EntryAction::Throttles(0.14), EntryAction::CaptureTakeoffHeading])
            .with_law(PhaseLaw::FlareBands { heading: HeadingRef::Takeoff, schedule }),
    ]);
    let mut controls = ControlState::default();
    let high = instruments(150.0, 280.0, 0.0, 0.0, 163.0);
    fly(&mut machine, &mut controls, &[high, high]);
    assert!((controls.elevator - 0.29).abs() < 1e-6);
    assert!(controls.throttle.iter().all(|t| (t - 0.14).abs() < 1e-6));
    machine.step(&instruments(150.0, 200.0, 0.0, 0.0, 163.0), &mut controls);
    assert!((controls.elevator - 0.31).abs() < 1e-6);
    assert!(controls.throttle.iter().all(|t| t.abs() < 1e-6));
}

#[test]
fn test_rollout_steer() {
    let mut machine = machine_for(vec![
        idle(),
        PhaseStep::new(FlightPhase::RolloutBrake, "rollout")
            .on_entry([EntryAction::Brakes(1.0)])
            .with_law(PhaseLaw::RolloutSteer { heading: HeadingRef::Fixed(163.0), rudder_gain: 5.0 }),
    ]);
    let mut controls = ControlState::default();
    let instr = instruments(60.0, 0.0, 0.0, 2.0, 165.0);
    fly(&mut machine, &mut controls, &[instr, instr]);
    assert!((f64::from(controls.rudder) + 0.4).abs() < EPS);
    assert!((f64::from(controls.aileron) + 2.0 / 50.0).abs() < EPS);
    assert!((controls.wheel_brake - 1.0).abs() < 1e-6);
    assert!((controls.left_brake - 1.0).abs() < 1e-6);
    assert!((controls.right_brake - 1.0).abs() < 1e-6);
}

#[test]
fn test_alignment_rudder_never_runs_away() {
    let schedule = test_schedule();
    let mut rng = rand::rng();
    for _ in 0..2000 {
        let error: f64 = rng.random_range(-0.49..0.49);
        let course: f64 = rng.random_range(0.0..360.0);
        let lon = TARGET_LON + error;
        let gain = schedule.bands()[schedule.band_index(schedule.error(lon))].gain;
        let rudder = schedule.rudder_command(lon, course);
        assert!(rudder.abs() <= 1.0);
        assert!(rudder.abs() <= gain * schedule.error(lon).abs() + 1e-12);
        // steering always points back towards the target longitude
        let eastward_drift = rudder * course.to_radians().cos();
        assert!(eastward_drift * schedule.error(lon) <= 1e-12);
    }
}

#[test]
fn test_alignment_bands_and_status() {
    let schedule = test_schedule();
    assert_eq!(schedule.band_index(0.01), 0);
    assert_eq!(schedule.band_index(-0.003), 0);
    assert_eq!(schedule.band_index(0.001), 1);
    assert_eq!(schedule.band_index(-0.0002), 2);
    assert_eq!(schedule.band_index(0.0), 2);
    assert_eq!(schedule.status(TARGET_LON + 0.00005), AlignmentStatus::Aligned);
    assert_eq!(schedule.status(TARGET_LON - 0.01), AlignmentStatus::Correcting);
    assert_eq!(schedule.status(TARGET_LON + 0.6), AlignmentStatus::OutOfCapture);
    // east of the target while flying north, steer left
    assert!((schedule.rudder_command(TARGET_LON + 0.01, 0.0) + 0.06).abs() < EPS);
    // same offset flying south, steer right
    assert!((schedule.rudder_command(TARGET_LON + 0.01, 180.0) - 0.06).abs() < EPS);
    assert!((schedule.rudder_command(TARGET_LON + 0.2, 0.0) + 1.0).abs() < EPS);
}

fn alignment_plan() -> Vec<PhaseStep> {
    vec![
        idle(),
        PhaseStep::new(FlightPhase::LongitudeAlign, "align")
            .on_entry([EntryAction::ArmLongitudeAlignment])
            .with_law(PhaseLaw::AlignLongitude { course: HeadingRef::Fixed(0.0) })
            .until(ExitPredicate::LongitudeAligned),
        PhaseStep::new(FlightPhase::Descent, "descend"),
    ]
}

#[test]
fn test_longitude_alignment_phase() {
    let mut machine = machine_for(alignment_plan());
    let mut controls = ControlState::default();
    let east = at_position(instruments(200.0, 3000.0, 0.0, 0.0, 0.0), 47.6, TARGET_LON + 0.01);
    fly(&mut machine, &mut controls, &[east, east]);
    assert_eq!(machine.phase(), FlightPhase::LongitudeAlign);
    assert!((f64::from(controls.rudder) + 0.06).abs() < EPS);

    let closer = at_position(east, 47.6, TARGET_LON + 0.001);
    machine.step(&closer, &mut controls);
    assert_eq!(machine.phase(), FlightPhase::LongitudeAlign);
    assert!((f64::from(controls.rudder) + 0.012).abs() < EPS);

    let aligned = at_position(east, 47.6, TARGET_LON - 0.00005);
    assert_eq!(machine.step(&aligned, &mut controls), Some(FlightPhase::Descent));
}

#[test]
fn test_longitude_alignment_gives_up_out_of_capture() {
    let mut machine = machine_for(alignment_plan());
    let mut controls = ControlState::default();
    let far = at_position(instruments(200.0, 3000.0, 0.0, 0.0, 0.0), 47.6, TARGET_LON + 1.5);
    fly(&mut machine, &mut controls, &[far, far]);
    assert_eq!(machine.phase(), FlightPhase::LongitudeAlign);
    assert!(controls.rudder.abs() < 1e-6);
    assert_eq!(machine.step(&far, &mut controls), Some(FlightPhase::Descent));
}

#[test]
fn test_profiles_are_well_formed() {
    for kind in ProfileKind::iter() {
        let profile = AircraftProfile::new(kind);
        let plan = profile.plan();
        assert_eq!(plan[0].phase(), FlightPhase::Idle);
        assert_eq!(plan[0].exit(), ExitPredicate::Always);
        assert_eq!(plan.last().map(PhaseStep::exit), Some(ExitPredicate::Never));
        assert!(plan[..plan.len() - 1].iter().all(|s| s.exit() != ExitPredicate::Never));
        assert_eq!(ProfileKind::from(kind.to_string().as_str()), kind);
    }
    let circuit = AircraftProfile::new(ProfileKind::Circuit);
    assert_eq!(circuit.layout(), CommandLayout::HighLift);
    assert_eq!(circuit.plan().last().map(PhaseStep::phase), Some(FlightPhase::RolloutBrake));
    let approach = AircraftProfile::new(ProfileKind::LongitudeApproach);
    let target = approach.alignment().map(AlignmentSchedule::target_lon);
    assert!(target.is_some_and(|lon| (lon - KSEA_16L_LON).abs() < 1e-6));
}

#[test]
fn test_profile_kind_fallback() {
    assert_eq!(ProfileKind::from("Straight-Out"), ProfileKind::StraightOut);
    assert_eq!(ProfileKind::from("longitude-approach"), ProfileKind::LongitudeApproach);
    assert_eq!(ProfileKind::from("XWing"), ProfileKind::XWing);
    assert_eq!(ProfileKind::from("barrel-roll"), ProfileKind::Circuit);
}

#[test]
#[should_panic(expected = "occurs 2 times")]
fn test_repeated_phase_is_rejected() {
    machine_for(vec![
        idle(),
        PhaseStep::new(FlightPhase::Cruise, "cruise").until(ExitPredicate::Always),
        PhaseStep::new(FlightPhase::Cruise, "cruise again"),
    ]);
}

#[test]
fn test_differential_thrust_follows_roll_sign() {
    let mut machine = machine_for(vec![
        idle(),
        PhaseStep::new(FlightPhase::Cruise, "thrust")
            .with_law(PhaseLaw::DifferentialThrust { high: 1.0, low: 0.9 }),
    ]);
    let mut controls = ControlState::default();
    machine.step(&instruments(200.0, 1000.0, 5.0, -4.0, 163.0), &mut controls);
    assert_eq!(controls.throttle, [0.0; 4]);
    machine.step(&instruments(200.0, 1000.0, 5.0, -4.0, 163.0), &mut controls);
    assert_eq!(controls.throttle, [1.0, 1.0, 0.9, 0.9]);
    machine.step(&instruments(200.0, 1000.0, 5.0, 4.0, 163.0), &mut controls);
    assert_eq!(controls.throttle, [0.9, 0.9, 1.0, 1.0]);
    machine.step(&instruments(200.0, 1000.0, 5.0, 0.0, 163.0), &mut controls);
    assert_eq!(controls.throttle, [0.9, 0.9, 1.0, 1.0], "wings level gets the right hand split");
}

#[test]
fn test_bang_bang_bank_and_pitch_toggle() {
    let mut machine = machine_for(vec![
        idle(),
        PhaseStep::new(FlightPhase::Turn, "bank").with_law(PhaseLaw::BangBangBank {
            roll: -30.0,
            aileron: 0.2,
            pitch: Some(PitchToggle { nose_low: 0.3, nose_high: -0.1 }),
        }),
    ]);
    let mut controls = ControlState::default();
    machine.step(&instruments(200.0, 1000.0, 2.0, -10.0, 163.0), &mut controls);
    machine.step(&instruments(200.0, 1000.0, 2.0, -10.0, 163.0), &mut controls);
    assert!((controls.aileron + 0.2).abs() < 1e-6);
    assert!((controls.elevator + 0.1).abs() < 1e-6);
    machine.step(&instruments(200.0, 1000.0, -1.0, -40.0, 163.0), &mut controls);
    assert!((controls.aileron - 0.2).abs() < 1e-6);
    assert!((controls.elevator - 0.3).abs() < 1e-6);
    machine.step(&instruments(200.0, 1000.0, 0.0, -30.0, 163.0), &mut controls);
    assert!((controls.aileron - 0.2).abs() < 1e-6, "on the target bank the aileron is kept");
    assert!((controls.elevator + 0.1).abs() < 1e-6);
}

#[test]
fn test_x_wing_flight() {
    let mut machine = FlightPhaseMachine::new(AircraftProfile::new(ProfileKind::XWing));
    let mut controls = ControlState::default();
    let mut phases = vec![machine.phase()];
    let mut step = |instr: InstrumentState, controls: &mut ControlState| {
        if let Some(phase) = machine.step(&instr, controls) {
            phases.push(phase);
        }
    };
    step(instruments(0.0, 0.0, 0.0, 0.0, 163.0), &mut controls);
    step(instruments(0.0, 0.0, 0.0, 0.0, 163.0), &mut controls);
    step(instruments(150.0, 0.0, 0.0, 0.0, 163.0), &mut controls);
    step(instruments(160.0, 0.0, 0.0, 0.0, 163.0), &mut controls);
    step(instruments(200.0, 20.0, 8.0, 0.0, 163.0), &mut controls);
    step(instruments(210.0, 100.0, 10.0, -3.0, 163.0), &mut controls);
    assert!(!controls.gear_down);
    assert_eq!(controls.throttle, [1.0, 1.0, 0.9, 0.9]);
    step(instruments(210.0, 1125.0, 9.0, 2.0, 163.0), &mut controls);
    assert_eq!(controls.throttle, [0.7; 4]);
    step(instruments(210.0, 1300.0, 7.0, 2.0, 163.0), &mut controls);
    assert_eq!(controls.throttle, [0.9, 0.9, 1.0, 1.0]);
    step(instruments(200.0, 1400.0, 6.0, 0.0, 163.0), &mut controls);
    assert!((controls.aileron + 0.2).abs() < 1e-6);
    step(instruments(190.0, 1400.0, 5.0, -35.0, 90.0), &mut controls);
    assert!((controls.aileron - 0.2).abs() < 1e-6);
    step(instruments(190.0, 1400.0, 5.0, -30.0, 35.0), &mut controls);
    step(instruments(190.0, 1400.0, 5.0, -20.0, 10.0), &mut controls);
    step(instruments(190.0, 1400.0, 5.0, -10.0, 1.0), &mut controls);
    step(instruments(190.0, 1300.0, 0.0, -5.0, 359.0), &mut controls);
    step(instruments(190.0, 1200.0, -2.0, 0.0, 0.0), &mut controls);
    step(instruments(190.0, 700.0, -3.0, 1.0, 0.0), &mut controls);
    assert!((controls.elevator - 0.3).abs() < 1e-6);
    step(instruments(190.0, 900.0, 2.0, -1.0, 0.0), &mut controls);
    assert_eq!(controls.throttle, [0.0; 4]);
    step(instruments(170.0, 215.0, -4.0, 0.0, 0.0), &mut controls);
    step(instruments(160.0, 100.0, 5.0, 0.0, 0.0), &mut controls);
    assert_eq!(controls.throttle, [1.0; 4]);
    assert!((controls.elevator - 0.2).abs() < 1e-6);
    assert_eq!(
        phases,
        vec![
            FlightPhase::Idle,
            FlightPhase::GroundRoll,
            FlightPhase::Rotate,
            FlightPhase::InitialClimb,
            FlightPhase::GearRetract,
            FlightPhase::LevelOff,
            FlightPhase::Cruise,
            FlightPhase::Turn,
            FlightPhase::Turn,
            FlightPhase::Descent,
            FlightPhase::Turn,
            FlightPhase::Descent,
            FlightPhase::ClimbToAltitude,
            FlightPhase::Approach,
            FlightPhase::Flare,
            FlightPhase::ShortFinal,
        ]
    );
}
