use super::{
    alignment::{AlignmentSchedule, AlignmentStatus},
    common::geodetic::{heading_diff, reciprocal},
    control_state::ControlState,
    flight_phase::FlightPhase,
    instrument_state::InstrumentState,
    phase_plan::{EntryAction, ExitPredicate, HeadingRef, PhaseLaw, PhaseStep, PitchToggle},
    profile::{AircraftProfile, ControlGains},
};
use crate::{event, log, phase, warn};

/// Interprets the plan of an [`AircraftProfile`] one tick at a time.
///
/// The machine never blocks and never talks to the network: it maps the latest
/// [`InstrumentState`] onto mutations of the sticky [`ControlState`].
#[derive(Debug)]
pub struct FlightPhaseMachine {
    profile: AircraftProfile,
    index: usize,
    /// Ticks the current step has been active for.
    ticks_in_step: u64,
    takeoff_heading: Option<f64>,
    alignment_given_up: bool,
}

impl FlightPhaseMachine {
    pub fn new(profile: AircraftProfile) -> Self {
        Self { profile, index: 0, ticks_in_step: 0, takeoff_heading: None, alignment_given_up: false }
    }

    /// Returns to the first step and forgets everything captured during the previous attempt.
    pub fn reset(&mut self) {
        self.index = 0;
        self.ticks_in_step = 0;
        self.takeoff_heading = None;
        self.alignment_given_up = false;
    }

    pub fn profile(&self) -> &AircraftProfile { &self.profile }
    pub fn phase(&self) -> FlightPhase { self.current().phase() }
    pub fn step_index(&self) -> usize { self.index }
    #[allow(dead_code)]
    pub fn takeoff_heading(&self) -> Option<f64> { self.takeoff_heading }

    fn current(&self) -> &PhaseStep { &self.profile.plan()[self.index] }

    fn is_terminal(&self) -> bool { self.index + 1 >= self.profile.plan().len() }

    /// Runs one tick of the plan.
    ///
    /// The exit predicate of the active step is checked first, but only once the step has had a
    /// tick exchanged with the simulator. On transition the entry actions of the next step are
    /// applied. Afterwards the law of the (possibly new) active step updates `controls`.
    ///
    /// Returns the newly entered phase, if any.
    pub fn step(&mut self, instr: &InstrumentState, controls: &mut ControlState) -> Option<FlightPhase> {
        let mut transition = None;
        if self.ticks_in_step > 0 && !self.is_terminal() {
            let exit = self.current().exit();
            if self.law_context().exit_holds(exit, instr) {
                self.index += 1;
                self.ticks_in_step = 0;
                let step = &self.profile.plan()[self.index];
                phase!("{} ({})", step.narration(), step.phase());
                let (phase, entry) = (step.phase(), step.entry().to_vec());
                let mut ctx = self.law_context();
                for action in entry {
                    ctx.enter(action, instr, controls);
                }
                transition = Some(phase);
            }
        }
        let Self { profile, index, takeoff_heading, alignment_given_up, .. } = self;
        let mut ctx = LawContext {
            gains: profile.gains(),
            alignment: profile.alignment(),
            takeoff_heading,
            alignment_given_up,
        };
        ctx.apply(profile.plan()[*index].law(), instr, controls);
        self.ticks_in_step += 1;
        transition
    }

    fn law_context(&mut self) -> LawContext<'_> {
        LawContext {
            gains: self.profile.gains(),
            alignment: self.profile.alignment(),
            takeoff_heading: &mut self.takeoff_heading,
            alignment_given_up: &mut self.alignment_given_up,
        }
    }
}

/// Borrowed view of the machine while a law, entry action or predicate is evaluated.
struct LawContext<'a> {
    gains: &'a ControlGains,
    alignment: Option<&'a AlignmentSchedule>,
    takeoff_heading: &'a mut Option<f64>,
    alignment_given_up: &'a mut bool,
}

impl LawContext<'_> {
    fn takeoff(&mut self, instr: &InstrumentState) -> f64 {
        *self.takeoff_heading.get_or_insert_with(|| {
            event!("Takeoff heading captured lazily at {:.1}°", instr.true_heading());
            instr.true_heading()
        })
    }

    fn heading(&mut self, reference: HeadingRef, instr: &InstrumentState) -> f64 {
        match reference {
            HeadingRef::Takeoff => self.takeoff(instr),
            HeadingRef::Reciprocal => reciprocal(self.takeoff(instr)),
            HeadingRef::Fixed(hdg) => hdg,
        }
    }

    /// Signed heading error of the aircraft against `reference`, positive when right of it.
    fn heading_error(&mut self, reference: HeadingRef, instr: &InstrumentState) -> f64 {
        let target = self.heading(reference, instr);
        heading_diff(instr.true_heading(), target)
    }

    fn enter(&mut self, action: EntryAction, instr: &InstrumentState, controls: &mut ControlState) {
        match action {
            EntryAction::Throttles(level) => controls.set_throttles(level),
            EntryAction::ThrottleLevers(levels) => controls.set_throttle_levers(levels),
            EntryAction::Elevator(cmd) => controls.set_elevator(f64::from(cmd)),
            EntryAction::Aileron(cmd) => controls.set_aileron(f64::from(cmd)),
            EntryAction::Rudder(cmd) => controls.set_rudder(f64::from(cmd)),
            EntryAction::NoseSteer(cmd) => controls.nose_steer = cmd.clamp(-1.0, 1.0),
            EntryAction::GearDown(down) => controls.gear_down = down,
            EntryAction::Brakes(level) => controls.set_brakes(level),
            EntryAction::Flaps(ratio) => controls.flaps = ratio.clamp(0.0, 1.0),
            EntryAction::SpeedBrake(ratio) => controls.speed_brake = ratio.clamp(0.0, 1.0),
            EntryAction::CaptureTakeoffHeading => {
                *self.takeoff_heading = Some(instr.true_heading());
                log!("Takeoff heading captured at {:.1}°", instr.true_heading());
            }
            EntryAction::ArmLongitudeAlignment => {
                *self.alignment_given_up = false;
                if let Some(schedule) = self.alignment {
                    log!(
                        "Aligning on longitude {:.6}, current error {:.6}°",
                        schedule.target_lon(),
                        schedule.error(instr.longitude())
                    );
                }
            }
        }
    }

    fn apply(&mut self, law: &PhaseLaw, instr: &InstrumentState, controls: &mut ControlState) {
        match law {
            PhaseLaw::Hold => {}
            PhaseLaw::BankToHeading { heading, elevator } => {
                self.bank_to_heading(*heading, *elevator, instr, controls);
            }
            PhaseLaw::FixedBank { roll, elevator } => self.turn(*roll, *elevator, instr, controls),
            PhaseLaw::Dampers { pitch, heading } => {
                self.roll_damper(instr, controls);
                if *pitch {
                    self.pitch_damper(instr, controls);
                }
                if let Some(reference) = heading {
                    self.heading_hold(*reference, self.gains.heading_rudder, instr, controls);
                }
            }
            PhaseLaw::ElevatorBands { schedule, heading } => {
                let band = schedule.select(instr.altitude_agl());
                controls.set_elevator(band.elevator);
                if let Some(level) = band.throttle {
                    controls.set_throttles(level);
                }
                self.roll_damper(instr, controls);
                if let Some(reference) = heading {
                    self.heading_hold(*reference, self.gains.heading_rudder, instr, controls);
                }
            }
            PhaseLaw::AlignLongitude { course } => {
                self.roll_damper(instr, controls);
                self.pitch_damper(instr, controls);
                self.align_longitude(*course, instr, controls);
            }
            PhaseLaw::FlareBands { heading, schedule } => {
                let band = schedule.select(instr.altitude_agl());
                if let Some(level) = band.throttle {
                    controls.set_throttles(level);
                }
                self.bank_to_heading(*heading, band.elevator, instr, controls);
            }
            PhaseLaw::RolloutSteer { heading, rudder_gain } => {
                self.roll_damper(instr, controls);
                self.heading_hold(*heading, *rudder_gain, instr, controls);
            }
            PhaseLaw::DifferentialThrust { high, low } => {
                Self::differential_thrust(*high, *low, instr, controls);
            }
            PhaseLaw::BangBangBank { roll, aileron, pitch } => {
                Self::bang_bang_bank(*roll, *aileron, instr, controls);
                if let Some(toggle) = pitch {
                    Self::pitch_toggle(*toggle, instr, controls);
                }
            }
        }
    }

    fn differential_thrust(high: f32, low: f32, instr: &InstrumentState, controls: &mut ControlState) {
        let levers = if instr.roll() < 0.0 { [high, high, low, low] } else { [low, low, high, high] };
        controls.set_throttle_levers(levers);
    }

    fn bang_bang_bank(target_roll: f64, aileron: f64, instr: &InstrumentState, controls: &mut ControlState) {
        if instr.roll() > target_roll {
            controls.set_aileron(-aileron);
        } else if instr.roll() < target_roll {
            controls.set_aileron(aileron);
        }
    }

    fn pitch_toggle(toggle: PitchToggle, instr: &InstrumentState, controls: &mut ControlState) {
        let elevator = if instr.pitch() < 0.0 { toggle.nose_low } else { toggle.nose_high };
        controls.set_elevator(elevator);
    }

    /// Rolls towards `target_roll` while compensating the pitch loss of the bank.
    fn turn(&self, target_roll: f64, elevator: f64, instr: &InstrumentState, controls: &mut ControlState) {
        controls.set_aileron((target_roll - instr.roll()) / self.gains.roll);
        controls.set_elevator(elevator - instr.roll() / self.gains.bank_pitch_comp);
    }

    fn bank_to_heading(
        &mut self,
        reference: HeadingRef,
        elevator: f64,
        instr: &InstrumentState,
        controls: &mut ControlState,
    ) {
        let max_bank = self.gains.max_bank;
        let target_roll = (-self.heading_error(reference, instr)).clamp(-max_bank, max_bank);
        self.turn(target_roll, elevator, instr, controls);
    }

    fn roll_damper(&self, instr: &InstrumentState, controls: &mut ControlState) {
        controls.set_aileron(-instr.roll() / self.gains.roll);
    }

    fn pitch_damper(&self, instr: &InstrumentState, controls: &mut ControlState) {
        controls.set_elevator(-instr.pitch() / self.gains.pitch);
    }

    fn heading_hold(
        &mut self,
        reference: HeadingRef,
        gain: f64,
        instr: &InstrumentState,
        controls: &mut ControlState,
    ) {
        let err = self.heading_error(reference, instr);
        controls.set_rudder(-err / gain);
    }

    fn align_longitude(&mut self, course: HeadingRef, instr: &InstrumentState, controls: &mut ControlState) {
        let Some(schedule) = self.alignment else { return };
        match schedule.status(instr.longitude()) {
            AlignmentStatus::OutOfCapture => {
                if !*self.alignment_given_up {
                    warn!(
                        "Longitude error {:.4}° exceeds the capture limit, skipping alignment",
                        schedule.error(instr.longitude())
                    );
                    *self.alignment_given_up = true;
                }
                controls.set_rudder(0.0);
            }
            AlignmentStatus::Aligned | AlignmentStatus::Correcting => {
                let course = self.heading(course, instr);
                controls.set_rudder(schedule.rudder_command(instr.longitude(), course));
            }
        }
    }

    fn exit_holds(&mut self, exit: ExitPredicate, instr: &InstrumentState) -> bool {
        match exit {
            ExitPredicate::Always => true,
            ExitPredicate::Never => false,
            ExitPredicate::KiasAtLeast(kias) => instr.kias() >= kias,
            ExitPredicate::KiasAtMost(kias) => instr.kias() <= kias,
            ExitPredicate::AglAtLeast(agl) => instr.altitude_agl() >= agl,
            ExitPredicate::AglAtMost(agl) => instr.altitude_agl() <= agl,
            ExitPredicate::PitchAtMost(pitch) => instr.pitch() <= pitch,
            ExitPredicate::RollAtLeast(roll) => instr.roll() >= roll,
            ExitPredicate::HeadingAtMost(heading) => instr.true_heading() <= heading,
            ExitPredicate::HeadingWithin { heading, tolerance } => {
                self.heading_error(heading, instr).abs() <= tolerance
            }
            ExitPredicate::LatitudeAtLeast(lat) => instr.latitude() >= lat,
            ExitPredicate::LatitudeAtMost(lat) => instr.latitude() <= lat,
            ExitPredicate::IndicatedMphAtMost(mph) => instr.mph() <= mph,
            ExitPredicate::LongitudeAligned => match self.alignment {
                // out of capture counts as aligned, the aircraft continues on its current track
                Some(schedule) => {
                    *self.alignment_given_up
                        || schedule.status(instr.longitude()) != AlignmentStatus::Correcting
                }
                None => true,
            },
        }
    }
}
