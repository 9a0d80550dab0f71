//! Color sensor trait

use crate::color::{Channel, ChannelReading, Classification, ClassifierPolicy, RgbReading};

/// Trait for three-channel color sensors
///
/// Implementations handle channel selection, settling and pulse timing for
/// a specific part (TCS3200/TCS230, ...). Sampling blocks for the settling
/// delay plus at most the configured pulse timeout, and never fails: a
/// missing pulse is reported as [`ChannelReading::TIMEOUT`].
pub trait ColorSensor {
    /// Select `channel`, let the output settle, and measure one pulse
    fn sample_channel(&mut self, channel: Channel) -> ChannelReading;

    /// Sample red, green and blue, in that order
    fn read_rgb(&mut self) -> RgbReading {
        let mut reading = RgbReading::new(0, 0, 0);
        for channel in Channel::ALL {
            reading.set(channel, self.sample_channel(channel));
        }
        reading
    }

    /// Sample all channels and classify the result
    fn classify(&mut self, policy: &ClassifierPolicy) -> Classification {
        policy.classify(self.read_rgb())
    }
}
