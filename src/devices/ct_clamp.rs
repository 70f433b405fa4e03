//! CT clamp RMS current estimator
//!
//! Classic split-core current transformer front end: the clamp's burden
//! resistor voltage is biased to mid-rail and fed to one ADC channel. Per
//! conversion the estimator tracks the DC midpoint with a 1/1024 digital
//! low-pass, squares the centered sample, and accumulates; the window RMS in
//! amperes is
//!
//! ```text
//! irms = calibration * (vref / full_scale) * sqrt(sum_sq / n)
//! ```
//!
//! The estimator busy-samples for the whole window and is treated by its
//! callers as an opaque span.

use crate::devices::traits::CurrentSensor;
use crate::platform::traits::AdcSource;

/// ADC reference voltage (volts). The RP2350 ADC runs from the 3.3 V rail.
const ADC_VREF: f64 = 3.3;

/// Time constant divisor of the midpoint tracking low-pass.
const OFFSET_FILTER: f64 = 1024.0;

/// A current transformer clamp on one ADC channel.
pub struct CtClamp<A: AdcSource> {
    adc: A,
    /// Amperes per unit of normalized input amplitude
    calibration: f64,
    /// Tracked DC midpoint in raw counts
    offset: f64,
}

impl<A: AdcSource> CtClamp<A> {
    /// Attach a clamp to an ADC channel with the given calibration constant.
    ///
    /// The midpoint tracker starts at half scale, which is where the bias
    /// network should sit; the low-pass converges onto the real midpoint
    /// within the first windows.
    pub fn new(adc: A, calibration: f64) -> Self {
        let offset = f64::from(adc.full_scale()) / 2.0;
        Self {
            adc,
            calibration,
            offset,
        }
    }
}

impl<A: AdcSource> CurrentSensor for CtClamp<A> {
    async fn estimate_rms(&mut self, sample_count: u32) -> f64 {
        let mut sum_sq = 0.0f64;
        let mut used = 0u32;

        for _ in 0..sample_count {
            // A failed conversion is skipped; it neither aborts the window
            // nor contributes a bogus sample.
            let Ok(raw) = self.adc.sample().await else {
                continue;
            };
            let raw = f64::from(raw);
            self.offset += (raw - self.offset) / OFFSET_FILTER;
            let centered = raw - self.offset;
            sum_sq += centered * centered;
            used += 1;
        }

        if used == 0 {
            return 0.0;
        }

        let ratio = self.calibration * ADC_VREF / f64::from(self.adc.full_scale());
        ratio * libm::sqrt(sum_sq / f64::from(used))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::error::AdcError;
    use crate::platform::mock::MockAdc;

    const FULL_SCALE: f64 = 4095.0;

    /// Expected amperes for a centered waveform of the given RMS amplitude
    /// in raw counts.
    fn amps_for_rms_counts(calibration: f64, rms_counts: f64) -> f64 {
        calibration * ADC_VREF / FULL_SCALE * rms_counts
    }

    #[tokio::test]
    async fn flat_input_reads_near_zero() {
        let adc = MockAdc::constant(2048);
        let mut clamp = CtClamp::new(adc, 60.6);
        let irms = clamp.estimate_rms(1480).await;
        // The midpoint tracker swallows the small bias between 2047.5 and
        // 2048; only its settling transient contributes.
        assert!(irms < 0.05, "flat input read {irms} A");
    }

    #[tokio::test]
    async fn square_wave_amplitude_recovered() {
        // +/-1000 counts around mid-rail: RMS amplitude is exactly 1000.
        let adc = MockAdc::with_pattern(&[3048, 1048]);
        let mut clamp = CtClamp::new(adc, 60.6);
        let irms = clamp.estimate_rms(1480).await;

        let expected = amps_for_rms_counts(60.6, 1000.0);
        let error = (irms - expected).abs() / expected;
        assert!(error < 0.01, "irms {irms} vs expected {expected}");
    }

    #[tokio::test]
    async fn calibration_scales_linearly() {
        let adc = MockAdc::with_pattern(&[3048, 1048]);
        let mut low = CtClamp::new(adc, 10.0);
        let low_irms = low.estimate_rms(1000).await;

        let adc = MockAdc::with_pattern(&[3048, 1048]);
        let mut high = CtClamp::new(adc, 20.0);
        let high_irms = high.estimate_rms(1000).await;

        let ratio = high_irms / low_irms;
        assert!((ratio - 2.0).abs() < 1e-9, "ratio {ratio}");
    }

    #[tokio::test]
    async fn failed_conversions_are_skipped() {
        let mut adc = MockAdc::with_pattern(&[3048, 1048]);
        adc.set_error(AdcError::ConversionFailed);
        let mut clamp = CtClamp::new(adc, 60.6);

        // Whole window fails: reads as zero current, not an error.
        assert_eq!(clamp.estimate_rms(100).await, 0.0);
    }

    #[tokio::test]
    async fn window_attempts_every_conversion() {
        let adc = MockAdc::constant(2048);
        let mut clamp = CtClamp::new(adc, 60.6);
        let _ = clamp.estimate_rms(250).await;
        assert_eq!(clamp.adc.conversions(), 250);
    }
}
