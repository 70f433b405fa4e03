//! Telemetry: readings, wire encoding, transport, and the reporting loop.

pub mod reading;
pub mod task;
pub mod transport;

pub use reading::{Reading, PAYLOAD_CAPACITY};
pub use task::TelemetryLoop;
pub use transport::{TelemetrySink, TransportError};
