//! TCS3200 / TCS230 color sensor driver
//!
//! The sensor is a grid of filtered photodiodes feeding a current-to-
//! frequency converter. Two select lines (S2, S3) pick which filter group
//! drives the output, and two scaling lines (S0, S1) divide the output
//! frequency. The driver measures the width of one low pulse on the
//! output: the shorter the pulse, the more light on the selected channel.
//!
//! # Usage
//!
//! ```ignore
//! let mut sensor = Tcs3200::new(pins, pulse_input, delay, &config.sensor);
//! let reading = sensor.read_rgb();
//! let result = policy.classify(reading);
//! ```

use chromasort_core::color::{Channel, ChannelReading};
use chromasort_core::config::{FrequencyScaling, SensorConfig};
use chromasort_core::traits::ColorSensor;
use chromasort_hal::{OutputPin, PulseInput, PulseLevel};
use embedded_hal::delay::DelayNs;

/// Control lines of the sensor
pub struct Tcs3200Pins<O> {
    /// Frequency scaling select 0
    pub s0: O,
    /// Frequency scaling select 1
    pub s1: O,
    /// Filter select 2
    pub s2: O,
    /// Filter select 3
    pub s3: O,
}

/// TCS3200 driver
pub struct Tcs3200<O, P, D> {
    pins: Tcs3200Pins<O>,
    out: P,
    delay: D,
    scaling: FrequencyScaling,
    /// Wait after switching filters before measuring (ms)
    settling_ms: u16,
    /// Bound on a single measurement (µs)
    timeout_us: u32,
}

impl<O: OutputPin, P: PulseInput, D: DelayNs> Tcs3200<O, P, D> {
    /// Create a new driver and apply the configured frequency scaling
    pub fn new(pins: Tcs3200Pins<O>, out: P, delay: D, config: &SensorConfig) -> Self {
        let mut sensor = Self {
            pins,
            out,
            delay,
            scaling: config.frequency_scaling,
            settling_ms: config.settling_ms,
            timeout_us: config.timeout_us,
        };
        sensor.set_scaling(config.frequency_scaling);
        sensor
    }

    /// Change the output frequency scaling
    pub fn set_scaling(&mut self, scaling: FrequencyScaling) {
        let (s0, s1) = scaling.pins();
        self.pins.s0.set_state(s0);
        self.pins.s1.set_state(s1);
        self.scaling = scaling;
    }

    /// Current output frequency scaling
    pub fn scaling(&self) -> FrequencyScaling {
        self.scaling
    }

    /// Route a channel's photodiodes to the output
    pub fn select(&mut self, channel: Channel) {
        let (s2, s3) = channel.selector();
        self.pins.s2.set_state(s2);
        self.pins.s3.set_state(s3);
    }

    /// Release the pins, pulse input and delay
    pub fn release(self) -> (Tcs3200Pins<O>, P, D) {
        (self.pins, self.out, self.delay)
    }
}

impl<O: OutputPin, P: PulseInput, D: DelayNs> ColorSensor for Tcs3200<O, P, D> {
    fn sample_channel(&mut self, channel: Channel) -> ChannelReading {
        self.select(channel);
        self.delay.delay_ms(self.settling_ms as u32);

        let reading = match self.out.measure_pulse_us(PulseLevel::Low, self.timeout_us) {
            Ok(us) => ChannelReading::from_us(us),
            Err(_) => ChannelReading::TIMEOUT,
        };

        #[cfg(feature = "defmt")]
        trace_sample(channel, reading);

        reading
    }
}

#[cfg(feature = "defmt")]
fn trace_sample(channel: Channel, reading: ChannelReading) {
    if reading.is_timeout() {
        defmt::trace!("tcs3200: {} timed out", channel);
    } else {
        defmt::trace!("tcs3200: {} = {} us", channel, reading.us());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromasort_core::color::{ClassifierPolicy, ColorLabel, RgbReading};
    use chromasort_hal::PulseError;
    use core::cell::Cell;

    /// Mock GPIO pin sharing its level with the test
    struct MockPin<'a> {
        high: &'a Cell<bool>,
    }

    impl OutputPin for MockPin<'_> {
        fn set_high(&mut self) {
            self.high.set(true);
        }

        fn set_low(&mut self) {
            self.high.set(false);
        }

        fn is_set_high(&self) -> bool {
            self.high.get()
        }
    }

    /// Pulse input answering from the current S2/S3 selection
    struct MockOutput<'a> {
        s2: &'a Cell<bool>,
        s3: &'a Cell<bool>,
        /// Pulse widths per channel; `None` never pulses
        widths: [Option<u32>; 3],
        timeouts_seen: Cell<u32>,
    }

    impl PulseInput for MockOutput<'_> {
        fn measure_pulse_us(
            &mut self,
            level: PulseLevel,
            timeout_us: u32,
        ) -> Result<u32, PulseError> {
            assert_eq!(level, PulseLevel::Low);
            self.timeouts_seen.set(timeout_us);

            let channel = match (self.s2.get(), self.s3.get()) {
                (false, false) => Channel::Red,
                (true, true) => Channel::Green,
                (false, true) => Channel::Blue,
                (true, false) => panic!("clear channel selected"),
            };
            self.widths[channel.index()].ok_or(PulseError::Timeout)
        }
    }

    /// Delay that only adds up requested time
    #[derive(Default)]
    struct MockDelay {
        total_ns: u64,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    struct Lines {
        s0: Cell<bool>,
        s1: Cell<bool>,
        s2: Cell<bool>,
        s3: Cell<bool>,
    }

    impl Lines {
        fn new() -> Self {
            Self {
                s0: Cell::new(false),
                s1: Cell::new(false),
                s2: Cell::new(true),
                s3: Cell::new(false),
            }
        }

        fn sensor(
            &self,
            widths: [Option<u32>; 3],
            config: &SensorConfig,
        ) -> Tcs3200<MockPin<'_>, MockOutput<'_>, MockDelay> {
            let pins = Tcs3200Pins {
                s0: MockPin { high: &self.s0 },
                s1: MockPin { high: &self.s1 },
                s2: MockPin { high: &self.s2 },
                s3: MockPin { high: &self.s3 },
            };
            let out = MockOutput {
                s2: &self.s2,
                s3: &self.s3,
                widths,
                timeouts_seen: Cell::new(0),
            };
            Tcs3200::new(pins, out, MockDelay::default(), config)
        }
    }

    #[test]
    fn test_applies_scaling_on_construction() {
        let lines = Lines::new();
        let sensor = lines.sensor([Some(1); 3], &SensorConfig::default());

        // 20%: S0 high, S1 low
        assert!(lines.s0.get());
        assert!(!lines.s1.get());
        assert_eq!(sensor.scaling(), FrequencyScaling::Percent20);
    }

    #[test]
    fn test_set_scaling() {
        let lines = Lines::new();
        let mut sensor = lines.sensor([Some(1); 3], &SensorConfig::default());

        sensor.set_scaling(FrequencyScaling::Percent2);
        assert!(!lines.s0.get());
        assert!(lines.s1.get());

        sensor.set_scaling(FrequencyScaling::PowerDown);
        assert!(!lines.s0.get());
        assert!(!lines.s1.get());
    }

    #[test]
    fn test_sample_selects_channel() {
        let lines = Lines::new();
        let mut sensor = lines.sensor([Some(40), Some(95), Some(80)], &SensorConfig::default());

        assert_eq!(sensor.sample_channel(Channel::Green), ChannelReading(95));
        assert!(lines.s2.get() && lines.s3.get());

        assert_eq!(sensor.sample_channel(Channel::Blue), ChannelReading(80));
        assert!(!lines.s2.get() && lines.s3.get());

        assert_eq!(sensor.sample_channel(Channel::Red), ChannelReading(40));
        assert!(!lines.s2.get() && !lines.s3.get());
    }

    #[test]
    fn test_settling_and_timeout_from_config() {
        let config = SensorConfig {
            settling_ms: 50,
            timeout_us: 250_000,
            ..Default::default()
        };
        let lines = Lines::new();
        let mut sensor = lines.sensor([Some(10); 3], &config);

        sensor.read_rgb();

        let (_, out, delay) = sensor.release();
        assert_eq!(delay.total_ns, 3 * 50_000_000);
        assert_eq!(out.timeouts_seen.get(), 250_000);
    }

    #[test]
    fn test_timeout_becomes_sentinel() {
        let lines = Lines::new();
        let mut sensor = lines.sensor([Some(60), None, Some(90)], &SensorConfig::default());

        let reading = sensor.read_rgb();
        assert_eq!(reading.red, ChannelReading(60));
        assert!(reading.green.is_timeout());
        assert_eq!(reading.blue, ChannelReading(90));
    }

    #[test]
    fn test_end_to_end_classification() {
        let lines = Lines::new();
        let mut sensor = lines.sensor([Some(40), Some(100), Some(110)], &SensorConfig::default());

        let result = sensor.classify(&ClassifierPolicy::calibrated());
        assert_eq!(result.label, ColorLabel::Red);
        assert_eq!(result.reading, RgbReading::new(40, 100, 110));

        // Dark sensor: every channel times out
        let lines = Lines::new();
        let mut sensor = lines.sensor([None; 3], &SensorConfig::default());
        let result = sensor.classify(&ClassifierPolicy::calibrated());
        assert_eq!(result.label, ColorLabel::Unknown);
    }
}
