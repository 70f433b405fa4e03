//! Current sensor trait
//!
//! Device-independent interface for RMS current estimation, consumed by the
//! telemetry loop. Implementations own their input channel and calibration;
//! callers only choose the window size.

/// An AC current estimator.
#[allow(async_fn_in_trait)]
pub trait CurrentSensor {
    /// Sample the input over a window of `sample_count` conversions and
    /// return the calibrated RMS current estimate in amperes.
    ///
    /// The estimate is always produced: implementations absorb conversion
    /// faults internally rather than surfacing them, and a window with no
    /// usable samples reads as 0.0 A.
    async fn estimate_rms(&mut self, sample_count: u32) -> f64;
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    //! Mock current sensor for testing the telemetry loop without an ADC.

    use super::CurrentSensor;

    /// Mock sensor returning a programmable RMS value.
    pub struct MockCurrentSensor {
        rms: f64,
        windows: u32,
        last_sample_count: Option<u32>,
    }

    impl MockCurrentSensor {
        /// Sensor that reports `rms` amperes for every window.
        pub fn new(rms: f64) -> Self {
            Self {
                rms,
                windows: 0,
                last_sample_count: None,
            }
        }

        /// Change the reported value.
        pub fn set_rms(&mut self, rms: f64) {
            self.rms = rms;
        }

        /// Number of estimation windows requested so far.
        pub fn windows(&self) -> u32 {
            self.windows
        }

        /// Sample count passed to the most recent estimation.
        pub fn last_sample_count(&self) -> Option<u32> {
            self.last_sample_count
        }
    }

    impl CurrentSensor for MockCurrentSensor {
        async fn estimate_rms(&mut self, sample_count: u32) -> f64 {
            self.windows += 1;
            self.last_sample_count = Some(sample_count);
            self.rms
        }
    }
}
