//! Embassy-backed time source

use crate::core::traits::TimeSource;
use embassy_time::Instant;

/// Time source over the Embassy time driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyTime;

impl TimeSource for EmbassyTime {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }

    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}
