//! RP2350 ADC channel
//!
//! Wraps the embassy-rp ADC and one input channel behind [`AdcSource`]. The
//! RP2350 ADC is 12-bit; conversions run one at a time on demand.

use crate::platform::error::AdcError;
use crate::platform::traits::AdcSource;
use embassy_rp::adc::{Adc, Async, Channel};

/// One ADC input channel on the RP2350.
pub struct Rp2350Adc {
    adc: Adc<'static, Async>,
    channel: Channel<'static>,
}

impl Rp2350Adc {
    pub fn new(adc: Adc<'static, Async>, channel: Channel<'static>) -> Self {
        Self { adc, channel }
    }
}

impl AdcSource for Rp2350Adc {
    async fn sample(&mut self) -> Result<u16, AdcError> {
        self.adc
            .read(&mut self.channel)
            .await
            .map_err(|_| AdcError::ConversionFailed)
    }

    fn full_scale(&self) -> u16 {
        4095
    }
}
