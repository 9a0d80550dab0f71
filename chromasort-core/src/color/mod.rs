//! Color classification
//!
//! Turns three pulse-width readings (one per filter channel) into a
//! discrete color label, and maps that label to a drop-off bin.

pub mod bin;
pub mod channel;
pub mod classifier;

pub use bin::{label_to_bin, BinMap, BinPosition};
pub use channel::{Channel, ChannelReading, RgbReading};
pub use classifier::{
    classify, ChannelStatus, Classification, ClassifierPolicy, ColorLabel, DominanceMargin,
    Outcome, ValidRange,
};
