use super::signal::{RestartCause, TickSignal};
use crate::airport;
use crate::console_communication::{DisplaySample, DisplaySink};
use crate::flight_control::{
    AircraftProfile, ControlState, FlightPhase, FlightPhaseMachine, InstrumentState,
};
use crate::sim_link::{LinkError, SimTransport};
use crate::{error, event, info, log, warn};

/// Owns everything an attempt needs and drives receive, step and send once per tick.
///
/// An attempt ends when the simulator respawns the aircraft or the network fails. Both unwind
/// to [`SimulationLifecycle::begin_attempt`], which starts over with fresh state.
pub struct SimulationLifecycle<T: SimTransport> {
    transport: T,
    machine: FlightPhaseMachine,
    instruments: InstrumentState,
    controls: ControlState,
    display: Option<Box<dyn DisplaySink>>,
    attempt: u32,
}

impl<T: SimTransport> SimulationLifecycle<T> {
    pub fn new(transport: T, profile: AircraftProfile) -> Self {
        Self {
            transport,
            machine: FlightPhaseMachine::new(profile),
            instruments: InstrumentState::default(),
            controls: ControlState::default(),
            display: None,
            attempt: 0,
        }
    }

    #[must_use]
    pub fn with_display(mut self, display: Box<dyn DisplaySink>) -> Self {
        self.display = Some(display);
        self
    }

    #[allow(dead_code)]
    pub fn transport(&self) -> &T { &self.transport }
    #[allow(dead_code)]
    pub fn phase(&self) -> FlightPhase { self.machine.phase() }
    #[allow(dead_code)]
    pub fn controls(&self) -> &ControlState { &self.controls }
    #[allow(dead_code)]
    pub fn instruments(&self) -> &InstrumentState { &self.instruments }
    #[allow(dead_code)]
    pub fn attempt(&self) -> u32 { self.attempt }

    /// Flies attempts forever.
    pub async fn run(&mut self) {
        loop {
            self.begin_attempt();
            let cause = loop {
                match self.tick().await {
                    TickSignal::Continue(controls) => event!("Tick done, throttles at {:?}", controls.throttle),
                    TickSignal::Restart(cause) => break cause,
                }
            };
            log!(
                "Attempt {} ended in {} (step {}): {cause}",
                self.attempt,
                self.machine.phase(),
                self.machine.step_index()
            );
        }
    }

    /// Discards the state of the previous attempt.
    pub fn begin_attempt(&mut self) {
        self.attempt += 1;
        self.controls = ControlState::default();
        self.instruments = InstrumentState::default();
        self.machine.reset();
        let kind = self.machine.profile().kind();
        info!("*** start of simulation *** (attempt {}, {kind} profile)", self.attempt);
        if let Some(display) = &self.display {
            display.attempt_started(self.attempt, kind);
        }
    }

    pub async fn tick(&mut self) -> TickSignal {
        match self.transport.receive_tick(&self.instruments).await {
            Ok(instr) => self.instruments = instr,
            Err(LinkError::Network(e)) => {
                error!("Receiving telemetry failed: {e}");
                return TickSignal::Restart(RestartCause::NetworkFailure);
            }
            Err(e) => {
                warn!("Skipping tick, telemetry unusable: {e:?}");
                return TickSignal::Continue(self.controls);
            }
        }

        self.machine.step(&self.instruments, &mut self.controls);

        match self.transport.send_tick(&self.controls).await {
            Ok(()) => {}
            Err(LinkError::NoPeer) => event!("Commands of this tick not sent, no simulator known"),
            Err(LinkError::Codec(e)) => warn!("Commands of this tick not sent: {e:?}"),
            Err(LinkError::Network(e)) => {
                error!("Sending commands failed: {e}");
                return TickSignal::Restart(RestartCause::NetworkFailure);
            }
        }

        if let Some(display) = &self.display {
            display.push(&DisplaySample::new(&self.instruments, self.machine.phase()));
        }

        let respawn = self.machine.profile().respawn();
        if self.machine.phase().detects_respawn()
            && self.instruments.looks_like_respawn(respawn.max_ground_speed_mph, respawn.max_agl)
        {
            self.log_respawn_site();
            return TickSignal::Restart(RestartCause::SimulatorReset);
        }
        TickSignal::Continue(self.controls)
    }

    fn log_respawn_site(&self) {
        let pos = self.instruments.lat_lon();
        let surface = if self.instruments.is_on_runway() { "on a runway" } else { "off runway" };
        match airport::closest_runway(&pos) {
            Some((apt, rwy)) => {
                let heading = airport::runway_heading(apt, rwy).unwrap_or(f64::NAN);
                info!(
                    "Aircraft standing {surface} near {apt} {rwy} (heading {heading:.0}°, {:.0} ft AGL), \
                     simulator was reset",
                    self.instruments.altitude_agl()
                );
            }
            None => info!("Aircraft standing {surface} at {pos}, simulator was reset"),
        }
    }
}
