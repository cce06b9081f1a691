use super::{
    link_error::CodecError,
    wire_record::{DataGroup, DataRecord, LABEL, RECORD_LEN},
};
use crate::flight_control::InstrumentState;
use crate::{event, warn};

/// Decodes one telemetry datagram on top of the `previous` snapshot.
///
/// Datagrams without the `DATA@` label leave the snapshot untouched. Records of groups the
/// autopilot does not read are skipped, a trailing partial record is dropped.
pub fn decode_telemetry(
    datagram: &[u8],
    previous: &InstrumentState,
) -> Result<InstrumentState, CodecError> {
    let Some(payload) = datagram.strip_prefix(LABEL) else {
        event!("Ignoring {} byte datagram without DATA@ label", datagram.len());
        return Ok(*previous);
    };
    let records = payload.chunks_exact(RECORD_LEN);
    let trailing = records.remainder().len();
    if trailing > 0 {
        warn!("Telemetry payload of {} bytes ends in a partial record, dropping {trailing} bytes", payload.len());
    }
    let mut instr = *previous;
    for bytes in records {
        let record = DataRecord::decode(bytes)?;
        let values = record.values_f64();
        match record.group() {
            Some(DataGroup::Speeds) => instr.apply_speeds(&values),
            Some(DataGroup::HighLift) => instr.apply_high_lift(&values),
            Some(DataGroup::AttitudeHeading) => instr.apply_attitude(&values),
            Some(DataGroup::Position) => instr.apply_position(&values),
            _ => event!("Skipping telemetry group {}", record.group_id()),
        }
    }
    Ok(instr)
}
