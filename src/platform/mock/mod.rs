//! Mock platform implementations for host testing.

pub mod adc;

pub use adc::MockAdc;
