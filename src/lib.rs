#![cfg_attr(not(test), no_std)]

//! ampnode - network-attached current sensor node for Raspberry Pi Pico 2 W
//!
//! This library provides the platform abstraction, the CT-clamp current
//! estimator, and the sample-compute-transmit telemetry loop that reports
//! RMS current and derived real power to a UDP collector.

// Platform abstraction layer (ADC, time, network, mocks)
pub mod platform;

// Current sensing devices using platform abstraction
pub mod devices;

// Core systems: configuration, connectivity state machine, fixed-rate scheduling
pub mod core;

// Reading, payload encoding, transport, and the telemetry loop
pub mod telemetry;

// Note: Logging macros (log_info!, log_warn!, log_error!, log_debug!, log_trace!)
// are exported at crate root via #[macro_export] in core::logging
