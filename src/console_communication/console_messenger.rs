use super::console_endpoint::{ConsoleEndpoint, ConsoleEvent};
use super::display_messages;
use super::display_sink::{DisplaySample, DisplaySink};
use crate::flight_control::ProfileKind;
use crate::{event, info};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::broadcast::error::RecvError;

/// Streams [`DisplaySample`]s to connected dashboards and answers their pings.
pub(crate) struct ConsoleMessenger {
    endpoint: Arc<ConsoleEndpoint>,
    attempt: AtomicU32,
}

impl ConsoleMessenger {
    pub(crate) async fn start(port: u16) -> Result<Self, std::io::Error> {
        let endpoint = Arc::new(ConsoleEndpoint::bind(port).await?);
        let mut receiver = endpoint.upstream_event_receiver().resubscribe();
        let endpoint_local = Arc::clone(&endpoint);
        let shutdown = endpoint.shutdown_token();

        tokio::spawn(async move {
            loop {
                let event = tokio::select! {
                    event = receiver.recv() => event,
                    () = shutdown.cancelled() => break
                };
                match event {
                    Ok(ConsoleEvent::Message(display_messages::UpstreamContent::Ping(ping))) => {
                        endpoint_local.send_downstream(display_messages::DownstreamContent::Pong(
                            display_messages::Pong { echo: ping.echo },
                        ));
                    }
                    Ok(ConsoleEvent::Connected) => event!("Dashboard connection registered"),
                    Ok(ConsoleEvent::Disconnected) => info!("Dashboard disconnected"),
                    Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => break,
                }
            }
        });

        Ok(Self { endpoint, attempt: AtomicU32::new(0) })
    }

    #[allow(dead_code)]
    pub(crate) fn local_addr(&self) -> SocketAddr { self.endpoint.local_addr() }
}

impl DisplaySink for ConsoleMessenger {
    #[allow(clippy::cast_possible_truncation)]
    fn push(&self, sample: &DisplaySample) {
        if !self.endpoint.is_console_connected() {
            return;
        }
        self.endpoint.send_downstream(display_messages::DownstreamContent::Sample(
            display_messages::Sample {
                timestamp: chrono::Utc::now().timestamp_millis(),
                attempt: self.attempt.load(Ordering::Relaxed),
                phase: sample.phase.to_string(),
                indicated_mph: sample.indicated_mph as f32,
                altitude_agl: sample.altitude_agl as f32,
                pitch: sample.pitch as f32,
                roll: sample.roll as f32,
            },
        ));
    }

    fn attempt_started(&self, attempt: u32, profile: ProfileKind) {
        self.attempt.store(attempt, Ordering::Relaxed);
        if !self.endpoint.is_console_connected() {
            return;
        }
        self.endpoint.send_downstream(display_messages::DownstreamContent::AttemptStarted(
            display_messages::AttemptStarted {
                timestamp: chrono::Utc::now().timestamp_millis(),
                attempt,
                profile: profile.to_string(),
            },
        ));
    }
}

impl Drop for ConsoleMessenger {
    fn drop(&mut self) { self.endpoint.close(); }
}
