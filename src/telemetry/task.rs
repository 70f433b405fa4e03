//! The sample-compute-transmit loop
//!
//! One cycle: estimate RMS current, derive power at the assumed line voltage,
//! encode the payload, hand it to the transport, log a diagnostic line. The
//! loop carries no state between cycles; everything observable about a cycle
//! is a function of the sensor's current estimate.
//!
//! Scheduling lives with the platform task (`platform::rp2350::tasks`): this
//! type performs cycles, the platform decides when, on the fixed-rate grid of
//! [`core::rate::FixedRate`](crate::core::rate::FixedRate).

use crate::core::config::NodeConfig;
use crate::devices::traits::CurrentSensor;
use crate::telemetry::reading::Reading;
use crate::telemetry::transport::TelemetrySink;

/// The periodic reporting activity.
///
/// Owns the sensor and the transport exclusively; nothing else touches them
/// for the lifetime of the process.
pub struct TelemetryLoop<S: CurrentSensor, X: TelemetrySink> {
    sensor: S,
    sink: X,
    line_voltage: f64,
    sample_count: u32,
}

impl<S: CurrentSensor, X: TelemetrySink> TelemetryLoop<S, X> {
    pub fn new(sensor: S, sink: X, config: &NodeConfig) -> Self {
        Self {
            sensor,
            sink,
            line_voltage: config.telemetry.line_voltage,
            sample_count: config.sensor.sample_count,
        }
    }

    /// One sample-compute-transmit cycle.
    ///
    /// Transmission is fire-and-forget: a failed send is logged at debug
    /// level and otherwise discarded. The choice is deliberate - the next
    /// cycle samples fresh data, so replaying a stale reading buys nothing.
    pub async fn run_once(&mut self) -> Reading {
        let rms = self.sensor.estimate_rms(self.sample_count).await;
        let reading = Reading::from_rms(rms, self.line_voltage);

        let payload = reading.encode();
        if let Err(err) = self.sink.send(payload.as_bytes()).await {
            crate::log_debug!("telemetry send failed: {}", err);
        }

        crate::log_info!(
            "Sent: I = {} A, P = {} W",
            reading.rms_current,
            reading.real_power
        );

        reading
    }

    /// The transport, for inspection.
    pub fn sink(&self) -> &X {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::NodeConfig;
    use crate::devices::traits::current::mock::MockCurrentSensor;
    use crate::telemetry::transport::mock::MockSink;
    use crate::telemetry::transport::TransportError;

    fn test_config() -> NodeConfig {
        NodeConfig::deploy().expect("default build env must be valid")
    }

    #[tokio::test]
    async fn cycle_emits_expected_datagram() {
        let sensor = MockCurrentSensor::new(2.5);
        let mut telemetry = TelemetryLoop::new(sensor, MockSink::new(), &test_config());

        let reading = telemetry.run_once().await;

        assert_eq!(reading.rms_current, 2.5);
        assert_eq!(reading.real_power, 575.0);
        assert_eq!(telemetry.sink().sent().len(), 1);
        assert_eq!(telemetry.sink().last_sent(), Some(b"2.500,575.00".as_slice()));
    }

    #[tokio::test]
    async fn cycle_passes_configured_window_to_sensor() {
        let config = test_config();
        let sensor = MockCurrentSensor::new(0.0);
        let mut telemetry = TelemetryLoop::new(sensor, MockSink::new(), &config);

        telemetry.run_once().await;

        assert_eq!(
            telemetry.sensor.last_sample_count(),
            Some(config.sensor.sample_count)
        );
    }

    #[tokio::test]
    async fn identical_input_gives_identical_payloads() {
        let sensor = MockCurrentSensor::new(1.234);
        let mut telemetry = TelemetryLoop::new(sensor, MockSink::new(), &test_config());

        telemetry.run_once().await;
        telemetry.run_once().await;

        let sent = telemetry.sink().sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], sent[1]);
    }

    #[tokio::test]
    async fn zero_current_is_a_reading_not_an_error() {
        let sensor = MockCurrentSensor::new(0.0);
        let mut telemetry = TelemetryLoop::new(sensor, MockSink::new(), &test_config());

        telemetry.run_once().await;

        assert_eq!(telemetry.sink().last_sent(), Some(b"0.000,0.00".as_slice()));
    }

    #[tokio::test]
    async fn send_failure_is_absorbed() {
        let sensor = MockCurrentSensor::new(1.0);
        let mut sink = MockSink::new();
        sink.set_error(TransportError::NoRoute);
        let mut telemetry = TelemetryLoop::new(sensor, sink, &test_config());

        // The cycle still completes and still produces its reading.
        let reading = telemetry.run_once().await;
        assert_eq!(reading.real_power, 230.0);
        assert_eq!(telemetry.sink().attempts(), 1);
        assert_eq!(telemetry.sink().sent().len(), 0);

        // The next cycle is the only retry there is.
        telemetry.sink.clear_error();
        telemetry.run_once().await;
        assert_eq!(telemetry.sink().sent().len(), 1);
    }

    #[tokio::test]
    async fn one_datagram_per_cycle() {
        let sensor = MockCurrentSensor::new(0.42);
        let mut telemetry = TelemetryLoop::new(sensor, MockSink::new(), &test_config());

        for expected in 1..=5 {
            telemetry.run_once().await;
            assert_eq!(telemetry.sink().attempts(), expected);
            assert_eq!(telemetry.sink().sent().len(), expected as usize);
        }
    }
}
