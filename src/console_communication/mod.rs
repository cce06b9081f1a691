//! Optional live feed for dashboards.
//! `console_endpoint` accepts dashboard connections over TCP, `console_messenger` turns
//! per-tick samples into `display_messages` and answers pings.

mod console_endpoint;
mod console_messenger;
mod display_messages;
mod display_sink;


pub(crate) use console_messenger::ConsoleMessenger;
pub use display_sink::{DisplaySample, DisplaySink};
