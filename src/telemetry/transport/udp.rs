//! UDP telemetry sink (Pico 2 W)
//!
//! One embassy-net UDP socket, bound once to the local port, sending every
//! payload to the fixed collector endpoint. Connectionless and unicast; the
//! socket is owned exclusively by the telemetry task.
#![cfg(feature = "pico2_w")]

use super::{TelemetrySink, TransportError};
use embassy_net::udp::{PacketMetadata, SendError, UdpSocket};
use embassy_net::{IpAddress, IpEndpoint, Ipv4Address, Stack};

/// UDP datagram sink addressed at the collector.
pub struct UdpTelemetry<'a> {
    socket: UdpSocket<'a>,
    collector: IpEndpoint,
}

impl<'a> UdpTelemetry<'a> {
    /// Bind a socket on `local_port` and aim it at the collector endpoint.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        stack: Stack<'a>,
        local_port: u16,
        collector_addr: [u8; 4],
        collector_port: u16,
        rx_meta: &'a mut [PacketMetadata],
        rx_buffer: &'a mut [u8],
        tx_meta: &'a mut [PacketMetadata],
        tx_buffer: &'a mut [u8],
    ) -> Self {
        let mut socket = UdpSocket::new(stack, rx_meta, rx_buffer, tx_meta, tx_buffer);

        if socket.bind(local_port).is_err() {
            crate::log_error!("Failed to bind UDP socket to port {}", local_port);
        } else {
            crate::log_info!("UDP socket bound to port {}", local_port);
        }

        let [a, b, c, d] = collector_addr;
        let collector = IpEndpoint::new(
            IpAddress::Ipv4(Ipv4Address::new(a, b, c, d)),
            collector_port,
        );

        Self { socket, collector }
    }
}

impl TelemetrySink for UdpTelemetry<'_> {
    async fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
        self.socket
            .send_to(payload, self.collector)
            .await
            .map_err(|e| match e {
                SendError::NoRoute => TransportError::NoRoute,
                SendError::SocketNotBound => TransportError::Unbound,
                SendError::PacketTooLarge => TransportError::Oversize,
            })
    }
}
