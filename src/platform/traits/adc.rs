//! ADC abstraction
//!
//! A single-channel view of an analog-to-digital converter: the estimator
//! owns one channel and only ever asks for raw conversions from it.

use crate::platform::error::AdcError;

/// One analog input channel of an ADC.
#[allow(async_fn_in_trait)]
pub trait AdcSource {
    /// One raw conversion of the attached channel.
    async fn sample(&mut self) -> Result<u16, AdcError>;

    /// Largest raw value the converter can produce (4095 for a 12-bit ADC).
    fn full_scale(&self) -> u16;
}
