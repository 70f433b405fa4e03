//! Platform abstraction traits.

pub mod adc;

pub use adc::AdcSource;
