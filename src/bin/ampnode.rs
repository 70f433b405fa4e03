//! ampnode - current sensor node firmware for Raspberry Pi Pico 2 W
//!
//! Startup sequence: build the configuration record, bring up WiFi (blocks
//! until associated), attach the CT clamp to the ADC, then hand off to the
//! telemetry task. After that main idles; the telemetry task is the only
//! ongoing activity.
//!
//! ```bash
//! # Build with deploy-time configuration
//! WIFI_SSID=mynet WIFI_PASSWORD=secret COLLECTOR_ADDR=192.168.1.100 \
//!     cargo build --release --features pico2_w \
//!     --target thumbv8m.main-none-eabihf
//!
//! # Flash to the Pico 2 W
//! probe-rs run --chip RP2350 target/thumbv8m.main-none-eabihf/release/ampnode
//! ```

#![no_std]
#![no_main]

use ampnode::core::config::NodeConfig;
use ampnode::devices::CtClamp;
use ampnode::platform::rp2350::network::establish_connectivity;
use ampnode::platform::rp2350::tasks::telemetry_task;
use ampnode::platform::rp2350::Rp2350Adc;
use ampnode::{log_error, log_info};
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::block::ImageDef;
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

hal::bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => hal::adc::InterruptHandler;
});

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    log_info!("ampnode current sensor");
    log_info!("======================");

    let config = match NodeConfig::deploy() {
        Ok(config) => config,
        Err(err) => {
            // Deploy-time mistake; nothing to do but report it and park.
            log_error!("Invalid build configuration: {}", err);
            loop {
                Timer::after(Duration::from_secs(3600)).await;
            }
        }
    };

    let p = hal::init(Default::default());

    // Blocks until the network accepts us. The control handle has to stay
    // alive, so it is kept in main for the life of the process.
    let (stack, _control) = establish_connectivity(
        spawner,
        &config.credentials,
        p.PIN_23,
        p.PIN_24,
        p.PIN_25,
        p.PIN_29,
        p.PIO0,
        p.DMA_CH0,
    )
    .await;

    // CT clamp on GPIO26 (ADC0)
    let adc = hal::adc::Adc::new(p.ADC, Irqs, hal::adc::Config::default());
    let channel = hal::adc::Channel::new_pin(p.PIN_26, hal::gpio::Pull::None);
    let sensor = CtClamp::new(Rp2350Adc::new(adc, channel), config.sensor.calibration);

    spawner.spawn(telemetry_task(stack, sensor, config)).unwrap();

    // Foreground stays idle; the telemetry task is the node's sole activity.
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
