//! Node configuration
//!
//! All deploy-time settings live in one immutable [`NodeConfig`] record built
//! once at startup and handed to the components that need it. There are no
//! runtime-mutable settings: changing anything means reflashing.
//!
//! WiFi credentials and the collector endpoint come from build-time
//! environment variables (see `build.rs`); the metering constants below are
//! properties of the sensor wiring and the deployment site.

use core::fmt;

/// Assumed RMS line voltage in volts. Real power is derived from RMS current
/// at this constant; there is no voltage channel on the node.
pub const LINE_VOLTAGE: f64 = 230.0;

/// CT clamp calibration: amperes per unit of normalized input amplitude.
/// Fine tune against a reference meter if needed.
pub const CURRENT_CALIBRATION: f64 = 60.6;

/// ADC conversions per RMS estimation window.
pub const RMS_SAMPLE_COUNT: u32 = 1480;

/// Interval between telemetry datagrams, in milliseconds.
pub const REPORT_PERIOD_MS: u64 = 1000;

/// Local UDP port the outbound socket binds to.
pub const LOCAL_PORT: u16 = 5005;

/// Delay between association polls while waiting for the network.
pub const LINK_POLL_INTERVAL_MS: u64 = 500;

/// WiFi network identity. Opaque to everything except the join logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkCredentials {
    /// WiFi network SSID (max 32 chars)
    pub ssid: heapless::String<32>,
    /// WiFi password (WPA2, max 63 chars)
    pub password: heapless::String<63>,
}

/// Current sensing constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorConfig {
    /// Amperes per unit of normalized input amplitude
    pub calibration: f64,
    /// ADC conversions per RMS window
    pub sample_count: u32,
}

/// Reporting constants: where readings go and how often.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryConfig {
    /// Collector IPv4 address
    pub collector_addr: [u8; 4],
    /// Collector UDP port
    pub collector_port: u16,
    /// Local UDP port for outbound sends
    pub local_port: u16,
    /// Assumed RMS line voltage (V)
    pub line_voltage: f64,
    /// Reporting period (ms)
    pub period_ms: u64,
}

/// Immutable node configuration, constructed once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeConfig {
    pub credentials: NetworkCredentials,
    pub sensor: SensorConfig,
    pub telemetry: TelemetryConfig,
}

/// Deploy-time configuration error. The only recovery is fixing the build
/// environment and reflashing, so the entry point logs it and parks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2_w", derive(defmt::Format))]
pub enum ConfigError {
    /// COLLECTOR_ADDR is not a dotted-quad IPv4 address
    BadCollectorAddr,
    /// COLLECTOR_PORT is not a valid port number
    BadCollectorPort,
    /// WIFI_SSID or WIFI_PASSWORD exceeds its field size
    CredentialsTooLong,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BadCollectorAddr => write!(f, "COLLECTOR_ADDR is not an IPv4 address"),
            ConfigError::BadCollectorPort => write!(f, "COLLECTOR_PORT is not a valid port"),
            ConfigError::CredentialsTooLong => write!(f, "WiFi credentials exceed field size"),
        }
    }
}

impl NodeConfig {
    /// Build the configuration record from the build-time environment and the
    /// metering constants above.
    pub fn deploy() -> Result<Self, ConfigError> {
        let mut ssid = heapless::String::new();
        ssid.push_str(env!("WIFI_SSID"))
            .map_err(|_| ConfigError::CredentialsTooLong)?;
        let mut password = heapless::String::new();
        password
            .push_str(env!("WIFI_PASSWORD"))
            .map_err(|_| ConfigError::CredentialsTooLong)?;
        let collector_addr =
            parse_ipv4(env!("COLLECTOR_ADDR")).ok_or(ConfigError::BadCollectorAddr)?;
        let collector_port = env!("COLLECTOR_PORT")
            .parse::<u16>()
            .map_err(|_| ConfigError::BadCollectorPort)?;

        Ok(Self {
            credentials: NetworkCredentials { ssid, password },
            sensor: SensorConfig {
                calibration: CURRENT_CALIBRATION,
                sample_count: RMS_SAMPLE_COUNT,
            },
            telemetry: TelemetryConfig {
                collector_addr,
                collector_port,
                local_port: LOCAL_PORT,
                line_voltage: LINE_VOLTAGE,
                period_ms: REPORT_PERIOD_MS,
            },
        })
    }
}

/// Parse a dotted-quad IPv4 address.
///
/// Rejects empty octets, values above 255, and anything but exactly four
/// fields. Leading zeros are accepted ("010" is 10).
pub fn parse_ipv4(s: &str) -> Option<[u8; 4]> {
    let mut octets = [0u8; 4];
    let mut fields = s.split('.');
    for octet in octets.iter_mut() {
        *octet = fields.next()?.parse::<u8>().ok()?;
    }
    if fields.next().is_some() {
        return None;
    }
    Some(octets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ipv4_accepts_dotted_quad() {
        assert_eq!(parse_ipv4("192.168.1.100"), Some([192, 168, 1, 100]));
        assert_eq!(parse_ipv4("0.0.0.0"), Some([0, 0, 0, 0]));
        assert_eq!(parse_ipv4("255.255.255.255"), Some([255, 255, 255, 255]));
    }

    #[test]
    fn parse_ipv4_rejects_malformed() {
        assert_eq!(parse_ipv4(""), None);
        assert_eq!(parse_ipv4("192.168.1"), None);
        assert_eq!(parse_ipv4("192.168.1.100.5"), None);
        assert_eq!(parse_ipv4("192.168.1.256"), None);
        assert_eq!(parse_ipv4("192.168..1"), None);
        assert_eq!(parse_ipv4("collector.local"), None);
    }

    #[test]
    fn deploy_uses_metering_constants() {
        let config = NodeConfig::deploy().expect("default build env must be valid");
        assert_eq!(config.sensor.calibration, CURRENT_CALIBRATION);
        assert_eq!(config.sensor.sample_count, RMS_SAMPLE_COUNT);
        assert_eq!(config.telemetry.line_voltage, LINE_VOLTAGE);
        assert_eq!(config.telemetry.period_ms, REPORT_PERIOD_MS);
        assert_eq!(config.telemetry.local_port, LOCAL_PORT);
    }

    #[test]
    fn deploy_parses_collector_endpoint() {
        let config = NodeConfig::deploy().expect("default build env must be valid");
        // COLLECTOR_ADDR comes through build.rs, so it must round-trip the
        // same parser.
        assert_eq!(
            parse_ipv4(env!("COLLECTOR_ADDR")),
            Some(config.telemetry.collector_addr)
        );
        assert!(config.telemetry.collector_port > 0);
    }
}
