/// Every command the autopilot sends to the simulator.
///
/// The state is sticky: a phase only overwrites the fields it manages and everything else keeps
/// its last commanded value. The whole struct is encoded on every send.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlState {
    pub gear_down: bool,
    pub wheel_brake: f32,
    pub left_brake: f32,
    pub right_brake: f32,
    pub elevator: f32,
    pub aileron: f32,
    pub rudder: f32,
    pub nose_steer: f32,
    pub throttle: [f32; 4],
    pub trim_elevator: f32,
    pub trim_aileron: f32,
    pub trim_rudder: f32,
    pub flaps: f32,
    pub speed_brake: f32,
}

impl Default for ControlState {
    /// Gear down, surfaces neutral, engines idle, no brakes.
    fn default() -> Self {
        Self {
            gear_down: true,
            wheel_brake: 0.0,
            left_brake: 0.0,
            right_brake: 0.0,
            elevator: 0.0,
            aileron: 0.0,
            rudder: 0.0,
            nose_steer: 0.0,
            throttle: [0.0; 4],
            trim_elevator: 0.0,
            trim_aileron: 0.0,
            trim_rudder: 0.0,
            flaps: 0.0,
            speed_brake: 0.0,
        }
    }
}

impl ControlState {
    pub fn set_throttles(&mut self, level: f32) { self.throttle = [level.clamp(0.0, 1.0); 4]; }

    pub fn set_throttle_levers(&mut self, levels: [f32; 4]) { self.throttle = levels.map(|l| l.clamp(0.0, 1.0)); }

    /// Applies wheel, left and right brakes together.
    pub fn set_brakes(&mut self, level: f32) {
        let level = level.clamp(0.0, 1.0);
        self.wheel_brake = level;
        self.left_brake = level;
        self.right_brake = level;
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn set_elevator(&mut self, cmd: f64) { self.elevator = cmd.clamp(-1.0, 1.0) as f32; }

    #[allow(clippy::cast_possible_truncation)]
    pub fn set_aileron(&mut self, cmd: f64) { self.aileron = cmd.clamp(-1.0, 1.0) as f32; }

    #[allow(clippy::cast_possible_truncation)]
    pub fn set_rudder(&mut self, cmd: f64) { self.rudder = cmd.clamp(-1.0, 1.0) as f32; }

    pub fn gear_as_f32(&self) -> f32 { if self.gear_down { 1.0 } else { 0.0 } }
}
