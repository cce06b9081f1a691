use super::{
    command_codec::{CommandLayout, encode_commands},
    link_error::LinkError,
    telemetry_codec::decode_telemetry,
};
use crate::flight_control::{ControlState, InstrumentState};
use crate::{event, info};
use async_trait::async_trait;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;

/// Exchange of one telemetry datagram and one command datagram per tick.
#[async_trait]
pub trait SimTransport: Send {
    /// Waits for the next telemetry datagram and merges it into `previous`.
    async fn receive_tick(&mut self, previous: &InstrumentState) -> Result<InstrumentState, LinkError>;
    /// Sends the full control state to the simulator that sent the last telemetry.
    async fn send_tick(&mut self, controls: &ControlState) -> Result<(), LinkError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkConfig {
    pub bind_ip: IpAddr,
    pub receive_port: u16,
    pub command_port: u16,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self { bind_ip: IpAddr::V4(Ipv4Addr::UNSPECIFIED), receive_port: 50000, command_port: 49000 }
    }
}

/// UDP link to a single simulator instance. The simulator's address is learned from the
/// telemetry it sends.
pub struct SimLink {
    receive_socket: UdpSocket,
    send_socket: UdpSocket,
    command_port: u16,
    layout: CommandLayout,
    peer: Option<IpAddr>,
    buffer: Vec<u8>,
}

impl SimLink {
    const RECEIVE_BUFFER_LEN: usize = 4096;

    pub async fn bind(config: &LinkConfig, layout: CommandLayout) -> Result<Self, LinkError> {
        let receive_socket = UdpSocket::bind(SocketAddr::new(config.bind_ip, config.receive_port)).await?;
        let unspecified = match config.bind_ip {
            IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
        };
        let send_socket = UdpSocket::bind(SocketAddr::new(unspecified, 0)).await?;
        info!(
            "Listening for telemetry on {}, commands go to port {} ({layout} layout)",
            receive_socket.local_addr()?,
            config.command_port
        );
        Ok(Self {
            receive_socket,
            send_socket,
            command_port: config.command_port,
            layout,
            peer: None,
            buffer: vec![0u8; Self::RECEIVE_BUFFER_LEN],
        })
    }

    #[allow(dead_code)]
    pub fn peer(&self) -> Option<IpAddr> { self.peer }
    #[allow(dead_code)]
    pub fn local_addr(&self) -> Result<SocketAddr, LinkError> { Ok(self.receive_socket.local_addr()?) }
}

#[async_trait]
impl SimTransport for SimLink {
    async fn receive_tick(&mut self, previous: &InstrumentState) -> Result<InstrumentState, LinkError> {
        let (len, sender) = self.receive_socket.recv_from(&mut self.buffer).await?;
        if self.peer != Some(sender.ip()) {
            info!("Simulator found at {}", sender.ip());
            self.peer = Some(sender.ip());
        }
        Ok(decode_telemetry(&self.buffer[..len], previous)?)
    }

    async fn send_tick(&mut self, controls: &ControlState) -> Result<(), LinkError> {
        let Some(peer) = self.peer else {
            event!("No simulator known yet, not sending commands");
            return Err(LinkError::NoPeer);
        };
        let datagram = encode_commands(controls, self.layout)?;
        self.send_socket.send_to(&datagram, SocketAddr::new(peer, self.command_port)).await?;
        Ok(())
    }
}
