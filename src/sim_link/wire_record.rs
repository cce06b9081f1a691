use super::link_error::CodecError;
use bincode::config::{self, Configuration, Fixint};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Header of every datagram exchanged with the simulator.
pub const LABEL: &[u8; 5] = b"DATA@";
/// A record is an `i32` group id followed by eight `f32` values.
pub const RECORD_LEN: usize = 36;
/// Slot value telling the simulator to keep its own value.
pub const NO_OVERRIDE: f32 = -999.0;

/// Records are packed without padding in the byte order of the host.
#[cfg(target_endian = "little")]
pub(super) const WIRE_CONFIG: Configuration<config::LittleEndian, Fixint> =
    config::standard().with_fixed_int_encoding();
#[cfg(target_endian = "big")]
pub(super) const WIRE_CONFIG: Configuration<config::BigEndian, Fixint> =
    config::standard().with_fixed_int_encoding().with_big_endian();

/// Data groups of the simulator's data output and input screen used by the autopilot.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, EnumIter)]
pub enum DataGroup {
    Speeds,
    Surfaces,
    Steering,
    HighLift,
    AttitudeHeading,
    GearBrakes,
    Position,
    Throttle,
}

impl DataGroup {
    pub fn id(self) -> i32 {
        match self {
            DataGroup::Speeds => 3,
            DataGroup::Surfaces => 8,
            DataGroup::Steering => 11,
            DataGroup::HighLift => 13,
            DataGroup::GearBrakes => 14,
            DataGroup::AttitudeHeading => 17,
            DataGroup::Position => 20,
            DataGroup::Throttle => 25,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> { DataGroup::iter().find(|group| group.id() == id) }
}

/// One 36 byte record of a `DATA@` datagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataRecord {
    group: i32,
    values: [f32; 8],
}

impl DataRecord {
    pub fn new(group: DataGroup, values: [f32; 8]) -> Self { Self { group: group.id(), values } }

    pub fn group_id(&self) -> i32 { self.group }
    pub fn group(&self) -> Option<DataGroup> { DataGroup::from_id(self.group) }
    #[allow(dead_code)]
    pub fn values(&self) -> &[f32; 8] { &self.values }
    pub fn values_f64(&self) -> [f64; 8] { self.values.map(f64::from) }

    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let (record, _) = bincode::serde::decode_from_slice::<Self, _>(bytes, WIRE_CONFIG)?;
        Ok(record)
    }

    pub fn encode_into(&self, buffer: &mut Vec<u8>) -> Result<(), CodecError> {
        buffer.extend(bincode::serde::encode_to_vec(self, WIRE_CONFIG)?);
        Ok(())
    }
}
