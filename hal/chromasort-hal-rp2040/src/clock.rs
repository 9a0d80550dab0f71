//! Microsecond clock

use chromasort_hal::MicrosClock;
use embassy_time::Instant;

/// Clock reading the embassy time driver
///
/// The RP2040 time driver runs off the 1 MHz timer peripheral, so reads
/// have full microsecond resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl MicrosClock for EmbassyClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}
