//! Embassy tasks for the Pico 2 W.

pub mod telemetry;

pub use telemetry::telemetry_task;
