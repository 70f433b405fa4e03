//! Readings and their wire encoding
//!
//! One reading is produced per reporting cycle and discarded after encoding.
//! The wire format is ASCII `"<rms_current>,<real_power>"` with exactly three
//! decimal places for current and two for power; collectors split on the
//! single comma.

use core::fmt::Write;

/// Upper bound on an encoded payload. Generous: any reading a CT clamp can
/// physically produce encodes well below this, and far below a datagram.
pub const PAYLOAD_CAPACITY: usize = 48;

/// One current/power observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// RMS current in amperes
    pub rms_current: f64,
    /// Real power in watts
    pub real_power: f64,
}

impl Reading {
    /// Derive a reading from an RMS current estimate at the assumed line
    /// voltage.
    ///
    /// Power here is `I * V` with no power-factor correction: the node has
    /// no voltage channel, so phase information is simply not available.
    /// The approximation is part of the wire contract.
    pub fn from_rms(rms_current: f64, line_voltage: f64) -> Self {
        Self {
            rms_current,
            real_power: rms_current * line_voltage,
        }
    }

    /// Encode as the wire payload.
    ///
    /// Pure: the same reading always encodes to the same bytes.
    pub fn encode(&self) -> heapless::String<PAYLOAD_CAPACITY> {
        let mut payload = heapless::String::new();
        // Cannot overflow the capacity for any finite sensor-range value.
        let _ = write!(payload, "{:.3},{:.2}", self.rms_current, self.real_power);
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_is_exact_product() {
        let reading = Reading::from_rms(2.5, 230.0);
        assert_eq!(reading.real_power, 575.0);

        let reading = Reading::from_rms(0.0, 230.0);
        assert_eq!(reading.real_power, 0.0);

        let reading = Reading::from_rms(1.0, 120.0);
        assert_eq!(reading.real_power, 120.0);
    }

    #[test]
    fn encode_fixed_precision() {
        let reading = Reading::from_rms(2.5, 230.0);
        assert_eq!(reading.encode().as_str(), "2.500,575.00");
    }

    #[test]
    fn encode_zero_current() {
        let reading = Reading::from_rms(0.0, 230.0);
        assert_eq!(reading.encode().as_str(), "0.000,0.00");
    }

    #[test]
    fn encode_rounds_up() {
        // 0.9996 A rounds up to 1.000 at three decimal places.
        let reading = Reading::from_rms(0.9996, 230.0);
        assert_eq!(reading.encode().as_str(), "1.000,229.91");
    }

    #[test]
    fn encode_truncates_excess_digits() {
        let reading = Reading::from_rms(1.2345, 230.0);
        let payload = reading.encode();
        let (current, power) = payload.split_once(',').unwrap();
        assert_eq!(current, "1.234");
        // Two decimal places on the power field.
        let (_, frac) = power.split_once('.').unwrap();
        assert_eq!(frac.len(), 2);
    }

    #[test]
    fn encode_is_idempotent() {
        let reading = Reading::from_rms(1.379, 230.0);
        assert_eq!(reading.encode().as_str(), reading.encode().as_str());
    }

    #[test]
    fn payload_shape_is_bounded_and_splittable() {
        for rms in [0.0, 0.001, 2.5, 16.0, 63.999] {
            let payload = Reading::from_rms(rms, 230.0).encode();
            assert!(payload.len() <= PAYLOAD_CAPACITY);
            // Exactly one comma, and none inside the numeric fields.
            assert_eq!(payload.chars().filter(|&c| c == ',').count(), 1);
            let (current, power) = payload.split_once(',').unwrap();
            assert!(current.parse::<f64>().is_ok());
            assert!(power.parse::<f64>().is_ok());
        }
    }
}
