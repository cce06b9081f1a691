mod command_codec;
mod link_error;
#[allow(clippy::module_inception)]
mod sim_link;
mod telemetry_codec;
mod wire_record;


pub use command_codec::{CommandLayout, encode_commands};
pub use link_error::{CodecError, LinkError};
pub use sim_link::{LinkConfig, SimLink, SimTransport};
pub use telemetry_codec::decode_telemetry;
pub use wire_record::{DataGroup, DataRecord, LABEL, NO_OVERRIDE, RECORD_LEN};
