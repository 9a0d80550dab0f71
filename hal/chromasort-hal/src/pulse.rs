//! Pulse-width measurement
//!
//! The TCS3200 reports light intensity as a square wave whose period shrinks
//! as the light gets brighter. Measuring the width of one half-period is
//! enough to compare channels against each other.
//!
//! Every measurement is bounded by an explicit timeout: a dark or
//! disconnected sensor never stalls the caller for longer than that.

use crate::clock::MicrosClock;
use crate::gpio::InputPin;

/// Level of the pulse to measure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseLevel {
    /// Measure a low pulse (high → low → high)
    Low,
    /// Measure a high pulse (low → high → low)
    High,
}

/// Errors that can occur during pulse measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseError {
    /// No complete pulse was observed within the timeout window
    Timeout,
}

/// Trait for inputs that can time a single pulse
pub trait PulseInput {
    /// Measure the width of one pulse at `level`, in microseconds
    ///
    /// A pulse already in progress when the call starts is skipped, so the
    /// returned width always covers a complete pulse. The timeout spans the
    /// whole operation: waiting for the previous pulse to end, waiting for
    /// the next one to start, and timing it.
    fn measure_pulse_us(&mut self, level: PulseLevel, timeout_us: u32) -> Result<u32, PulseError>;
}

/// Pulse measurement by busy-polling a digital input
///
/// Works on any pin/clock pair. Resolution is bounded by how fast the loop
/// can sample the pin, which is well under a microsecond on a Cortex-M0+
/// at 125 MHz.
pub struct PolledPulseInput<P, C> {
    pin: P,
    clock: C,
}

impl<P: InputPin, C: MicrosClock> PolledPulseInput<P, C> {
    /// Create a new polled pulse input
    pub fn new(pin: P, clock: C) -> Self {
        Self { pin, clock }
    }

    /// Release the pin and clock
    pub fn release(self) -> (P, C) {
        (self.pin, self.clock)
    }

    fn is_at(&self, level: PulseLevel) -> bool {
        match level {
            PulseLevel::Low => self.pin.is_low(),
            PulseLevel::High => self.pin.is_high(),
        }
    }

    /// Spin while the pin equals `at_level`, returning the time it changed
    fn wait_while(
        &self,
        level: PulseLevel,
        at_level: bool,
        deadline: u64,
    ) -> Result<u64, PulseError> {
        loop {
            let now = self.clock.now_us();
            if self.is_at(level) != at_level {
                return Ok(now);
            }
            if now >= deadline {
                return Err(PulseError::Timeout);
            }
        }
    }
}

impl<P: InputPin, C: MicrosClock> PulseInput for PolledPulseInput<P, C> {
    fn measure_pulse_us(&mut self, level: PulseLevel, timeout_us: u32) -> Result<u32, PulseError> {
        let deadline = self.clock.now_us().saturating_add(timeout_us as u64);

        // Skip a pulse that is already in progress
        self.wait_while(level, true, deadline)?;
        // Wait for the pulse to start
        let start = self.wait_while(level, false, deadline)?;
        // Time it
        let end = self.wait_while(level, true, deadline)?;

        Ok(end.saturating_sub(start).min(u32::MAX as u64) as u32)
    }
}
