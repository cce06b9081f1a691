use super::display_messages;
use crate::{error, info, warn};
use prost::Message;
use std::io::{Cursor, ErrorKind};
use std::net::{Ipv4Addr, SocketAddr};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::net::tcp::{ReadHalf, WriteHalf};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub enum ConsoleEvent {
    Connected,
    Disconnected,
    Message(display_messages::UpstreamContent),
}

/// TCP endpoint for dashboards. Frames are a big endian `u32` length followed by a protobuf
/// message.
pub(crate) struct ConsoleEndpoint {
    downstream_sender: broadcast::Sender<Option<Vec<u8>>>,
    upstream_event_receiver: broadcast::Receiver<ConsoleEvent>,
    shutdown: CancellationToken,
    local_addr: SocketAddr,
}

impl ConsoleEndpoint {
    const MAX_FRAME_LEN: u32 = 1 << 16;

    async fn handle_connection_rx(
        socket: &mut ReadHalf<'_>,
        upstream_event_sender: &broadcast::Sender<ConsoleEvent>,
    ) -> Result<(), std::io::Error> {
        loop {
            let length = socket.read_u32().await?;
            if length > Self::MAX_FRAME_LEN {
                return Err(std::io::Error::new(ErrorKind::InvalidData, format!("frame of {length} bytes")));
            }

            let mut buffer = vec![0u8; length as usize];
            socket.read_exact(&mut buffer).await?;

            if let Ok(display_messages::Upstream { content: Some(content) }) =
                display_messages::Upstream::decode(&mut Cursor::new(buffer))
            {
                let _ = upstream_event_sender.send(ConsoleEvent::Message(content));
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    async fn handle_connection_tx(
        socket: &mut WriteHalf<'_>,
        downstream_receiver: &mut broadcast::Receiver<Option<Vec<u8>>>,
    ) -> Result<(), std::io::Error> {
        loop {
            match downstream_receiver.recv().await {
                Ok(Some(message_buffer)) => {
                    socket.write_u32(message_buffer.len() as u32).await?;
                    socket.write_all(&message_buffer).await?;
                }
                // slow dashboards miss samples instead of stalling the autopilot
                Err(broadcast::error::RecvError::Lagged(_)) => {}
                Ok(None) | Err(broadcast::error::RecvError::Closed) => return Ok(()),
            }
        }
    }

    pub(crate) async fn bind(port: u16) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)).await?;
        let local_addr = listener.local_addr()?;
        let downstream_sender = broadcast::Sender::new(64);
        let upstream_event_sender = broadcast::Sender::new(16);
        let shutdown = CancellationToken::new();
        let inst = Self {
            downstream_sender: downstream_sender.clone(),
            upstream_event_receiver: upstream_event_sender.subscribe(),
            shutdown: shutdown.clone(),
            local_addr,
        };
        info!("Display feed listening on {local_addr}");

        tokio::spawn(async move {
            loop {
                let accept = tokio::select! {
                    accept = listener.accept() => accept,
                    () = shutdown.cancelled() => break
                };

                match accept {
                    Ok((mut socket, peer)) => {
                        info!("Dashboard connected from {peer}");
                        let _ = upstream_event_sender.send(ConsoleEvent::Connected);
                        let upstream_event_sender_local = upstream_event_sender.clone();
                        let mut downstream_receiver = downstream_sender.subscribe();

                        tokio::spawn(async move {
                            let (mut rx_socket, mut tx_socket) = socket.split();

                            let result = tokio::select! {
                                res = ConsoleEndpoint::handle_connection_tx(&mut tx_socket, &mut downstream_receiver) => res,
                                res = ConsoleEndpoint::handle_connection_rx(&mut rx_socket, &upstream_event_sender_local) => res
                            };

                            let _ = upstream_event_sender_local.send(ConsoleEvent::Disconnected);
                            match result {
                                Err(e)
                                    if e.kind() == ErrorKind::UnexpectedEof
                                        || e.kind() == ErrorKind::ConnectionReset
                                        || e.kind() == ErrorKind::ConnectionAborted =>
                                {
                                    return;
                                }
                                Err(e) => warn!("Closing connection to dashboard due to {e:?}"),
                                Ok(()) => {}
                            }
                            let _ = socket.shutdown().await;
                        });
                    }
                    Err(e) => {
                        error!("Display feed stopped accepting connections: {e}");
                        break;
                    }
                }
            }
        });
        Ok(inst)
    }

    pub(crate) fn send_downstream(&self, msg: display_messages::DownstreamContent) {
        let _ = self
            .downstream_sender
            .send(Some(display_messages::Downstream { content: Some(msg) }.encode_to_vec()));
    }

    pub(crate) fn is_console_connected(&self) -> bool { self.downstream_sender.receiver_count() > 0 }

    pub(crate) fn upstream_event_receiver(&self) -> &broadcast::Receiver<ConsoleEvent> {
        &self.upstream_event_receiver
    }

    pub(crate) fn shutdown_token(&self) -> CancellationToken { self.shutdown.clone() }

    pub(crate) fn local_addr(&self) -> SocketAddr { self.local_addr }

    /// Stops accepting dashboards and closes all open connections.
    pub(crate) fn close(&self) {
        self.shutdown.cancel();
        let _ = self.downstream_sender.send(None);
    }
}

impl Drop for ConsoleEndpoint {
    fn drop(&mut self) { self.close(); }
}
