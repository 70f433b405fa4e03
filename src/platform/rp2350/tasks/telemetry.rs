//! Telemetry reporting task (Pico 2 W)
//!
//! The single long-lived application task: runs the sample-compute-transmit
//! loop forever on the fixed-rate grid. Spawned once after connectivity is
//! established; there is no way to stop or reconfigure it short of a reset.

use crate::core::config::NodeConfig;
use crate::core::rate::FixedRate;
use crate::core::traits::TimeSource;
use crate::devices::CtClamp;
use crate::platform::rp2350::{EmbassyTime, Rp2350Adc};
use crate::telemetry::transport::udp::UdpTelemetry;
use crate::telemetry::TelemetryLoop;
use embassy_net::udp::PacketMetadata;
use embassy_net::Stack;
use embassy_time::{Instant, Timer};
use static_cell::StaticCell;

/// Socket buffer sizing. Telemetry only ever sends one small payload per
/// period, so these stay minimal.
const TX_BUFFER_SIZE: usize = 256;
const RX_BUFFER_SIZE: usize = 64;

/// Periodic telemetry task.
///
/// Each cycle estimates RMS current over the configured window, derives real
/// power, and fires one datagram at the collector. Wakeups land on
/// `anchor + N * period`; an overrunning cycle skips beats instead of
/// bursting catch-up sends.
#[embassy_executor::task]
pub async fn telemetry_task(
    stack: Stack<'static>,
    sensor: CtClamp<Rp2350Adc>,
    config: NodeConfig,
) -> ! {
    static RX_META: StaticCell<[PacketMetadata; 4]> = StaticCell::new();
    static RX_BUFFER: StaticCell<[u8; RX_BUFFER_SIZE]> = StaticCell::new();
    static TX_META: StaticCell<[PacketMetadata; 4]> = StaticCell::new();
    static TX_BUFFER: StaticCell<[u8; TX_BUFFER_SIZE]> = StaticCell::new();

    let sink = UdpTelemetry::new(
        stack,
        config.telemetry.local_port,
        config.telemetry.collector_addr,
        config.telemetry.collector_port,
        RX_META.init([PacketMetadata::EMPTY; 4]),
        RX_BUFFER.init([0; RX_BUFFER_SIZE]),
        TX_META.init([PacketMetadata::EMPTY; 4]),
        TX_BUFFER.init([0; TX_BUFFER_SIZE]),
    );

    crate::log_info!(
        "Telemetry task started: period {} ms, window {} samples",
        config.telemetry.period_ms,
        config.sensor.sample_count
    );

    let time = EmbassyTime;
    let mut telemetry = TelemetryLoop::new(sensor, sink, &config);

    // The first cycle's start is the period anchor for every later wake.
    let rate = FixedRate::new(time.now_us(), config.telemetry.period_ms * 1000);

    loop {
        telemetry.run_once().await;

        let deadline = rate.next_deadline_us(time.now_us());
        Timer::at(Instant::from_micros(deadline)).await;
    }
}
