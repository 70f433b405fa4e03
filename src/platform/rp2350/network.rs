//! Pico 2 W WiFi bootstrap
//!
//! Brings up the CYW43439 driver and the embassy-net stack, then associates
//! with the configured network. Association retries forever: the node is
//! useless without the network, so startup simply blocks until the join
//! succeeds, polling at a fixed interval. There is no failure path out of
//! this module.
//!
//! # Connection flow
//!
//! ```text
//! 1. Load CYW43439 firmware blobs (PIO SPI, DMA)
//! 2. Spawn WiFi driver and net-stack runner tasks
//! 3. Join WPA2 network, retrying until accepted (LinkMonitor)
//! 4. Wait for link and DHCP lease
//! 5. Log the assigned address (diagnostics only) and return
//! ```
//!
//! The CYW43439 firmware blobs are the standard ones shipped with the cyw43
//! crate sources; place them under `cyw43-firmware/` at the crate root.

use crate::core::config::{NetworkCredentials, LINK_POLL_INTERVAL_MS};
use crate::core::connectivity::LinkMonitor;
use cyw43::{Control, JoinOptions};
use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Stack, StackResources};
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{DMA_CH0, PIN_23, PIN_24, PIN_25, PIN_29, PIO0};
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_rp::bind_interrupts;
use embassy_time::{with_timeout, Duration, Timer};
use rand_core::RngCore;
use static_cell::StaticCell;

/// Join attempt timeout. The first attempt after power-up often times out
/// while the radio settles; `leave()` between attempts resets driver state.
const JOIN_TIMEOUT_SECS: u64 = 5;

bind_interrupts!(pub struct PioIrqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

/// Establish network connectivity. Returns only on success.
///
/// Spawns the WiFi driver and net-stack runner tasks on `spawner`, joins the
/// configured network (retrying forever), waits for a DHCP lease, and hands
/// back the stack plus the driver control handle. The control handle must be
/// kept alive by the caller for the lifetime of the process.
#[allow(clippy::too_many_arguments)]
pub async fn establish_connectivity(
    spawner: Spawner,
    credentials: &NetworkCredentials,
    pin_23: PIN_23,
    pin_24: PIN_24,
    pin_25: PIN_25,
    pin_29: PIN_29,
    pio0: PIO0,
    dma_ch0: DMA_CH0,
) -> (Stack<'static>, Control<'static>) {
    let mut rng = RoscRng;

    crate::log_info!("Joining WiFi network: {}", credentials.ssid.as_str());

    // CYW43439 firmware blobs
    let fw = include_bytes!("../../../cyw43-firmware/43439A0.bin");
    let clm = include_bytes!("../../../cyw43-firmware/43439A0_clm.bin");

    // PIO-driven SPI to the WiFi chip
    let pwr = Output::new(pin_23, Level::Low);
    let cs = Output::new(pin_25, Level::High);
    let mut pio = Pio::new(pio0, PioIrqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        pin_24, // DIO
        pin_29, // CLK
        dma_ch0,
    );

    static STATE: StaticCell<cyw43::State> = StaticCell::new();
    let state = STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw).await;

    spawner.spawn(wifi_task(runner)).unwrap();

    control.init(clm).await;
    control
        .set_power_management(cyw43::PowerManagementMode::None)
        .await;

    // DHCP-configured network stack
    let seed = rng.next_u64();
    static STACK_RESOURCES: StaticCell<StackResources<4>> = StaticCell::new();
    let (stack, runner) = embassy_net::new(
        net_device,
        NetConfig::dhcpv4(Default::default()),
        STACK_RESOURCES.init(StackResources::new()),
        seed,
    );

    spawner.spawn(net_task(runner)).unwrap();

    // Association: retry forever at the poll interval. The monitor tracks
    // Disconnected -> Connecting -> Connected; its policy has no attempt cap.
    let mut monitor = LinkMonitor::new();
    while !monitor.is_connected() {
        monitor.begin_attempt();
        crate::log_info!("WiFi join attempt {}", monitor.attempts());

        let options = JoinOptions::new(credentials.password.as_bytes());
        let joined = with_timeout(
            Duration::from_secs(JOIN_TIMEOUT_SECS),
            control.join(credentials.ssid.as_str(), options),
        )
        .await;

        match joined {
            Ok(Ok(())) => {
                monitor.observe(true);
                crate::log_info!("WiFi connected after {} attempts", monitor.attempts());
            }
            Ok(Err(_)) => {
                monitor.observe(false);
                crate::log_warn!("WiFi join rejected on attempt {}", monitor.attempts());
            }
            Err(_timeout) => {
                monitor.observe(false);
                crate::log_warn!("WiFi join timeout on attempt {}", monitor.attempts());
            }
        }

        if !monitor.is_connected() {
            // leave() resets CYW43439 internal state after a failed attempt.
            control.leave().await;
            Timer::after(Duration::from_millis(LINK_POLL_INTERVAL_MS)).await;
        }
    }

    crate::log_info!("Waiting for link up...");
    stack.wait_link_up().await;

    crate::log_info!("Waiting for DHCP lease...");
    stack.wait_config_up().await;

    // Assigned address is reported for the operator; nothing consumes it.
    if let Some(config) = stack.config_v4() {
        let ip = config.address.address().octets();
        crate::log_info!("Address assigned: {}.{}.{}.{}", ip[0], ip[1], ip[2], ip[3]);
    }

    (stack, control)
}

/// CYW43439 driver event loop. Must run for WiFi to function.
#[embassy_executor::task]
async fn wifi_task(
    runner: cyw43::Runner<'static, Output<'static>, PioSpi<'static, PIO0, 0, DMA_CH0>>,
) -> ! {
    runner.run().await
}

/// embassy-net stack event loop. Must run for network operations to function.
#[embassy_executor::task]
async fn net_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}
