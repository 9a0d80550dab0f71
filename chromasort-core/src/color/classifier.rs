//! Color classification policies
//!
//! Three policies are supported:
//!
//! - [`ClassifierPolicy::ValidatedDominance`]: readings outside a calibrated
//!   window are discarded, and the brightest remaining channel must beat
//!   every other remaining channel by a margin. This is the default.
//! - [`ClassifierPolicy::ThresholdedArgmin`]: the brightest channel wins if
//!   it is strictly brighter than both others and below a fixed ceiling.
//! - [`ClassifierPolicy::NaiveArgmin`]: the brightest channel wins if it is
//!   strictly brighter than both others.
//!
//! Classification never fails. Timeouts, out-of-range readings and
//! ambiguous readings all collapse to [`ColorLabel::Unknown`]; the
//! [`Outcome`] and per-channel [`ChannelStatus`] keep the distinction for
//! diagnostics.

use super::channel::{Channel, ChannelReading, RgbReading};

/// Detected color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorLabel {
    Red,
    Green,
    Blue,
    /// No valid reading, or no channel clearly dominant
    Unknown,
}

impl ColorLabel {
    /// Lowercase name for logs
    pub const fn name(self) -> &'static str {
        match self {
            ColorLabel::Red => "red",
            ColorLabel::Green => "green",
            ColorLabel::Blue => "blue",
            ColorLabel::Unknown => "unknown",
        }
    }
}

impl From<Channel> for ColorLabel {
    fn from(channel: Channel) -> Self {
        match channel {
            Channel::Red => ColorLabel::Red,
            Channel::Green => ColorLabel::Green,
            Channel::Blue => ColorLabel::Blue,
        }
    }
}

/// Closed interval of trustworthy pulse widths (µs)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ValidRange {
    pub min: u32,
    pub max: u32,
}

impl ValidRange {
    /// Window measured on the reference sensor at 20% output scaling
    pub const CALIBRATED: ValidRange = ValidRange { min: 0, max: 116 };

    /// Create a new range (bounds inclusive)
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Check if a reading falls inside the range
    ///
    /// A timed-out reading is never inside, whatever the bounds.
    pub const fn contains(&self, reading: ChannelReading) -> bool {
        !reading.is_timeout() && reading.0 >= self.min && reading.0 <= self.max
    }
}

impl Default for ValidRange {
    fn default() -> Self {
        Self::CALIBRATED
    }
}

/// Relative advantage a channel needs over its competitors
///
/// Stored as permille: 900 means the winning reading must be strictly
/// below 90% of every other competing reading. Compared in exact integer
/// arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DominanceMargin {
    permille: u16,
}

impl DominanceMargin {
    /// 0.9: the winner must be at least 10% brighter than the others
    pub const DEFAULT: DominanceMargin = DominanceMargin { permille: 900 };

    /// Create a margin from a permille factor (clamped to 1000)
    pub const fn from_permille(permille: u16) -> Self {
        let permille = if permille > 1000 { 1000 } else { permille };
        Self { permille }
    }

    /// Factor in permille
    pub const fn permille(&self) -> u16 {
        self.permille
    }

    /// Check if `candidate` beats `other` by this margin
    pub const fn dominates(&self, candidate: ChannelReading, other: ChannelReading) -> bool {
        (candidate.0 as u64) * 1000 < (other.0 as u64) * (self.permille as u64)
    }
}

impl Default for DominanceMargin {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Per-channel diagnostic status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelStatus {
    /// Reading took part in the decision
    Valid,
    /// Pulse measured, but outside the trusted window
    OutOfRange,
    /// No pulse within the timeout
    TimedOut,
}

impl ChannelStatus {
    pub const fn is_valid(self) -> bool {
        matches!(self, ChannelStatus::Valid)
    }
}

/// Why a classification produced its label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// One channel won outright
    Dominant(Channel),
    /// Valid readings exist but none won; `lowest` is the brightest of them
    Ambiguous { lowest: Channel },
    /// Every reading was rejected
    NoValidReadings,
}

/// Result of one classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Classification {
    /// Detected color
    pub label: ColorLabel,
    /// How the label was reached
    pub outcome: Outcome,
    /// Status of each channel, indexed by [`Channel::index`]
    pub status: [ChannelStatus; 3],
    /// The readings that were classified
    pub reading: RgbReading,
}

impl Classification {
    /// Get the status of a channel
    pub const fn status_of(&self, channel: Channel) -> ChannelStatus {
        self.status[channel.index()]
    }

    /// Check if a color was positively identified
    pub const fn is_identified(&self) -> bool {
        matches!(self.outcome, Outcome::Dominant(_))
    }
}

/// Classification policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClassifierPolicy {
    /// Strict minimum of the three raw readings
    ///
    /// Any tie at the minimum yields Unknown. Timeouts still compete
    /// (as the largest possible reading).
    NaiveArgmin,
    /// Strict minimum, which must also be below `ceiling`
    ThresholdedArgmin { ceiling: u32 },
    /// Range gate followed by a dominance test among valid channels
    ValidatedDominance {
        range: ValidRange,
        margin: DominanceMargin,
    },
}

impl Default for ClassifierPolicy {
    fn default() -> Self {
        Self::calibrated()
    }
}

impl ClassifierPolicy {
    /// Validated dominance with the calibrated window and 0.9 margin
    pub const fn calibrated() -> Self {
        ClassifierPolicy::ValidatedDominance {
            range: ValidRange::CALIBRATED,
            margin: DominanceMargin::DEFAULT,
        }
    }

    /// Classify one set of readings
    ///
    /// Pure: the same input always yields the same result.
    pub fn classify(&self, reading: RgbReading) -> Classification {
        match *self {
            ClassifierPolicy::NaiveArgmin => classify_naive(reading),
            ClassifierPolicy::ThresholdedArgmin { ceiling } => {
                classify_thresholded(reading, ceiling)
            }
            ClassifierPolicy::ValidatedDominance { range, margin } => {
                classify_validated(reading, range, margin)
            }
        }
    }

    /// Classify raw pulse widths and return only the label
    pub fn label(&self, red: u32, green: u32, blue: u32) -> ColorLabel {
        self.classify(RgbReading::new(red, green, blue)).label
    }
}

/// Classify raw pulse widths with the default (calibrated) policy
pub fn classify(red: u32, green: u32, blue: u32) -> ColorLabel {
    ClassifierPolicy::calibrated().label(red, green, blue)
}

/// Channel whose reading is strictly below both others, if any
fn strict_argmin(reading: &RgbReading) -> Option<Channel> {
    Channel::ALL.into_iter().find(|&ch| {
        let value = reading.get(ch);
        Channel::ALL
            .into_iter()
            .filter(|&other| other != ch)
            .all(|other| value < reading.get(other))
    })
}

/// First-seen minimum among channels with a valid status
fn lowest_valid(reading: &RgbReading, status: &[ChannelStatus; 3]) -> Option<Channel> {
    let mut lowest: Option<Channel> = None;
    for ch in Channel::ALL {
        if !status[ch.index()].is_valid() {
            continue;
        }
        match lowest {
            Some(current) if reading.get(ch) >= reading.get(current) => {}
            _ => lowest = Some(ch),
        }
    }
    lowest
}

fn status_by(reading: &RgbReading, valid: impl Fn(ChannelReading) -> bool) -> [ChannelStatus; 3] {
    Channel::ALL.map(|ch| {
        let value = reading.get(ch);
        if value.is_timeout() {
            ChannelStatus::TimedOut
        } else if valid(value) {
            ChannelStatus::Valid
        } else {
            ChannelStatus::OutOfRange
        }
    })
}

fn finish(reading: RgbReading, status: [ChannelStatus; 3], outcome: Outcome) -> Classification {
    let label = match outcome {
        Outcome::Dominant(ch) => ch.into(),
        _ => ColorLabel::Unknown,
    };
    Classification {
        label,
        outcome,
        status,
        reading,
    }
}

fn classify_naive(reading: RgbReading) -> Classification {
    // Every measured pulse competes; only timeouts are flagged.
    let status = status_by(&reading, |_| true);

    let outcome = match strict_argmin(&reading) {
        Some(ch) => Outcome::Dominant(ch),
        None => {
            let all = [ChannelStatus::Valid; 3];
            let lowest = lowest_valid(&reading, &all).unwrap_or(Channel::Red);
            Outcome::Ambiguous { lowest }
        }
    };

    finish(reading, status, outcome)
}

fn classify_thresholded(reading: RgbReading, ceiling: u32) -> Classification {
    let status = status_by(&reading, |r| r.0 < ceiling);

    let outcome = match lowest_valid(&reading, &status) {
        None => Outcome::NoValidReadings,
        Some(lowest) => match strict_argmin(&reading) {
            Some(ch) if status[ch.index()].is_valid() => Outcome::Dominant(ch),
            _ => Outcome::Ambiguous { lowest },
        },
    };

    finish(reading, status, outcome)
}

fn classify_validated(
    reading: RgbReading,
    range: ValidRange,
    margin: DominanceMargin,
) -> Classification {
    let status = status_by(&reading, |r| range.contains(r));

    let outcome = match lowest_valid(&reading, &status) {
        None => Outcome::NoValidReadings,
        Some(lowest) => {
            let min = reading.get(lowest);
            let dominant = Channel::ALL
                .into_iter()
                .filter(|&other| other != lowest && status[other.index()].is_valid())
                .all(|other| margin.dominates(min, reading.get(other)));

            if dominant {
                Outcome::Dominant(lowest)
            } else {
                Outcome::Ambiguous { lowest }
            }
        }
    };

    finish(reading, status, outcome)
}
