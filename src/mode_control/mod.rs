//! The attempt loop: one attempt lasts from a fresh aircraft on the runway until the simulator
//! resets it or the link fails.

mod signal;
mod simulation_lifecycle;


pub use signal::{RestartCause, TickSignal};
pub use simulation_lifecycle::SimulationLifecycle;
