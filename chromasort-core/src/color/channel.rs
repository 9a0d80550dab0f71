//! Filter channels and raw readings

/// Photodiode filter channel of the color sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in sampling order
    ///
    /// This is also the tie-break priority: when two channels report the
    /// same reading, the one earlier in this list wins.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Selector line levels (S2, S3) that route this channel to the output
    ///
    /// Red = (L, L), Green = (H, H), Blue = (L, H). The remaining pattern
    /// (H, L) selects the unfiltered "clear" photodiodes, which are unused.
    pub const fn selector(self) -> (bool, bool) {
        match self {
            Channel::Red => (false, false),
            Channel::Green => (true, true),
            Channel::Blue => (false, true),
        }
    }

    /// Index into per-channel arrays
    pub const fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// Pulse width measured on one channel, in microseconds
///
/// Lower means brighter. [`ChannelReading::TIMEOUT`] stands in for
/// "no pulse seen": it is larger than any plausible measurement, so every
/// classifier treats it as the weakest possible signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelReading(pub u32);

impl ChannelReading {
    /// Sentinel for a measurement that timed out
    pub const TIMEOUT: ChannelReading = ChannelReading(u32::MAX);

    /// Create a reading from a pulse width in microseconds
    pub const fn from_us(us: u32) -> Self {
        Self(us)
    }

    /// Pulse width in microseconds
    pub const fn us(self) -> u32 {
        self.0
    }

    /// Check if this reading is the timeout sentinel
    pub const fn is_timeout(self) -> bool {
        self.0 == u32::MAX
    }
}

impl From<u32> for ChannelReading {
    fn from(us: u32) -> Self {
        Self(us)
    }
}

/// One reading per channel, taken in a single classification pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RgbReading {
    pub red: ChannelReading,
    pub green: ChannelReading,
    pub blue: ChannelReading,
}

impl RgbReading {
    /// Create from raw pulse widths
    pub const fn new(red: u32, green: u32, blue: u32) -> Self {
        Self {
            red: ChannelReading(red),
            green: ChannelReading(green),
            blue: ChannelReading(blue),
        }
    }

    /// Get the reading for a channel
    pub const fn get(&self, channel: Channel) -> ChannelReading {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }

    /// Set the reading for a channel
    pub fn set(&mut self, channel: Channel, reading: ChannelReading) {
        match channel {
            Channel::Red => self.red = reading,
            Channel::Green => self.green = reading,
            Channel::Blue => self.blue = reading,
        }
    }
}
