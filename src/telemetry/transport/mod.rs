//! Telemetry transport abstraction
//!
//! Readings leave the node as single datagrams through a [`TelemetrySink`].
//! The sink reports send failures, but delivery is best-effort end to end:
//! there is no acknowledgment and the reporting loop deliberately discards
//! the error, trusting the next cycle as the only retry.

pub mod udp;

use core::fmt;

/// Outbound datagram path to the collector.
#[allow(async_fn_in_trait)]
pub trait TelemetrySink {
    /// Hand one payload to the transport as a single datagram.
    ///
    /// Returns once the datagram is queued; nothing is awaited beyond that
    /// and nothing reports whether it arrived.
    async fn send(&mut self, payload: &[u8]) -> Result<(), TransportError>;
}

/// Transport send failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum TransportError {
    /// No route to the collector (link down, ARP unresolved)
    NoRoute,
    /// Socket is not bound to a local port
    Unbound,
    /// Payload exceeds what a single datagram can carry
    Oversize,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::NoRoute => write!(f, "no route to collector"),
            TransportError::Unbound => write!(f, "socket not bound"),
            TransportError::Oversize => write!(f, "payload too large for datagram"),
        }
    }
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    //! Mock sink for testing the reporting loop without a network.

    use super::{TelemetrySink, TransportError};
    use heapless::Vec;

    /// Most datagrams a mock will record.
    pub const MAX_RECORDED: usize = 32;

    /// Mock transport that records sent datagrams.
    pub struct MockSink {
        sent: Vec<Vec<u8, 64>, MAX_RECORDED>,
        error: Option<TransportError>,
        attempts: u32,
    }

    impl MockSink {
        pub fn new() -> Self {
            Self {
                sent: Vec::new(),
                error: None,
                attempts: 0,
            }
        }

        /// Make every subsequent send fail with `error`.
        pub fn set_error(&mut self, error: TransportError) {
            self.error = Some(error);
        }

        /// Restore successful sends.
        pub fn clear_error(&mut self) {
            self.error = None;
        }

        /// Datagrams recorded so far (failed sends record nothing).
        pub fn sent(&self) -> &[Vec<u8, 64>] {
            &self.sent
        }

        /// Bytes of the most recent recorded datagram.
        pub fn last_sent(&self) -> Option<&[u8]> {
            self.sent.last().map(|d| d.as_slice())
        }

        /// Sends attempted, including failed ones.
        pub fn attempts(&self) -> u32 {
            self.attempts
        }
    }

    impl Default for MockSink {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TelemetrySink for MockSink {
        async fn send(&mut self, payload: &[u8]) -> Result<(), TransportError> {
            self.attempts += 1;
            if let Some(error) = self.error {
                return Err(error);
            }
            let datagram = Vec::from_slice(payload).map_err(|_| TransportError::Oversize)?;
            self.sent.push(datagram).map_err(|_| TransportError::Oversize)?;
            Ok(())
        }
    }
}
