#![allow(clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod airport;
mod config;
mod console_communication;
mod flight_control;
mod logger;
mod mode_control;
mod sim_link;

use crate::config::AutopilotConfig;
use crate::console_communication::{ConsoleMessenger, DisplaySink};
use crate::flight_control::AircraftProfile;
use crate::mode_control::SimulationLifecycle;
use crate::sim_link::SimLink;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = AutopilotConfig::from_env();
    let profile = AircraftProfile::new(config.profile);
    info!("Flying the {} profile with {} phases", profile.kind(), profile.plan().len());

    let link = SimLink::bind(&config.link, profile.layout()).await.unwrap_or_else(|e| {
        fatal!("Cannot bind {}:{}: {e:?}", config.link.bind_ip, config.link.receive_port)
    });

    let mut lifecycle = SimulationLifecycle::new(link, profile);
    if let Some(port) = config.display_port {
        match ConsoleMessenger::start(port).await {
            Ok(messenger) => {
                let sink: Box<dyn DisplaySink> = Box::new(messenger);
                lifecycle = lifecycle.with_display(sink);
            }
            Err(e) => warn!("Display feed unavailable on port {port}: {e}"),
        }
    }
    lifecycle.run().await;
}
