//! Core abstraction traits.

pub mod time;

pub use time::{MockTime, TimeSource};
