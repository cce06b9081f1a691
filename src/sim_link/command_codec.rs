use super::{
    link_error::CodecError,
    wire_record::{DataGroup, DataRecord, LABEL, NO_OVERRIDE, RECORD_LEN},
};
use crate::flight_control::ControlState;
use strum_macros::Display;

/// Which records a command datagram carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CommandLayout {
    /// Gear and brakes, control surfaces, nose wheel steering and throttles.
    Basic,
    /// Like `Basic`, plus trims, flaps and speed brakes.
    HighLift,
}

impl CommandLayout {
    pub fn groups(self) -> &'static [DataGroup] {
        match self {
            CommandLayout::Basic => &[
                DataGroup::GearBrakes,
                DataGroup::Surfaces,
                DataGroup::Steering,
                DataGroup::Throttle,
            ],
            CommandLayout::HighLift => &[
                DataGroup::GearBrakes,
                DataGroup::Surfaces,
                DataGroup::Steering,
                DataGroup::HighLift,
                DataGroup::Throttle,
            ],
        }
    }

    pub fn datagram_len(self) -> usize { LABEL.len() + self.groups().len() * RECORD_LEN }
}

fn record_for(group: DataGroup, c: &ControlState) -> DataRecord {
    const X: f32 = NO_OVERRIDE;
    let values = match group {
        DataGroup::GearBrakes => [c.gear_as_f32(), c.wheel_brake, c.left_brake, c.right_brake, X, X, X, X],
        DataGroup::Surfaces => [c.elevator, c.aileron, c.rudder, X, c.nose_steer, X, X, X],
        DataGroup::Steering => [X, X, X, X, c.nose_steer, X, X, X],
        DataGroup::HighLift => {
            [c.trim_elevator, c.trim_aileron, c.trim_rudder, c.flaps, X, X, c.speed_brake, X]
        }
        DataGroup::Throttle => {
            let [t1, t2, t3, t4] = c.throttle;
            [t1, t2, t3, t4, X, X, X, X]
        }
        DataGroup::Speeds | DataGroup::AttitudeHeading | DataGroup::Position => [X; 8],
    };
    DataRecord::new(group, values)
}

/// Encodes the complete control state. Every slot without a command carries [`NO_OVERRIDE`].
pub fn encode_commands(controls: &ControlState, layout: CommandLayout) -> Result<Vec<u8>, CodecError> {
    let mut datagram = Vec::with_capacity(layout.datagram_len());
    datagram.extend_from_slice(LABEL);
    for group in layout.groups() {
        record_for(*group, controls).encode_into(&mut datagram)?;
    }
    Ok(datagram)
}
