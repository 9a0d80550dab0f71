//! Drop-off bins
//!
//! Each color label maps to a base-servo angle. The mapping is total:
//! Unknown has its own (fallback) bin so a failed classification still
//! ends with the object placed somewhere.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::classifier::ColorLabel;

/// Base servo angle for a drop-off bin, in degrees (0-180)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BinPosition(pub u8);

impl BinPosition {
    /// Angle in degrees
    pub const fn degrees(self) -> u8 {
        self.0
    }
}

/// Color label to bin mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BinMap {
    pub red: BinPosition,
    pub green: BinPosition,
    pub blue: BinPosition,
    /// Fallback bin for unidentified objects
    pub unknown: BinPosition,
}

impl Default for BinMap {
    fn default() -> Self {
        Self {
            red: BinPosition(60),
            green: BinPosition(30),
            blue: BinPosition(90),
            unknown: BinPosition(90),
        }
    }
}

impl BinMap {
    /// Get the bin for a color label
    pub const fn bin_for(&self, label: ColorLabel) -> BinPosition {
        match label {
            ColorLabel::Red => self.red,
            ColorLabel::Green => self.green,
            ColorLabel::Blue => self.blue,
            ColorLabel::Unknown => self.unknown,
        }
    }
}

/// Map a color label to its bin using the default layout
pub fn label_to_bin(label: ColorLabel) -> BinPosition {
    BinMap::default().bin_for(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        assert_eq!(label_to_bin(ColorLabel::Red), BinPosition(60));
        assert_eq!(label_to_bin(ColorLabel::Green), BinPosition(30));
        assert_eq!(label_to_bin(ColorLabel::Blue), BinPosition(90));
        assert_eq!(label_to_bin(ColorLabel::Unknown), BinPosition(90));
    }

    #[test]
    fn test_every_label_has_a_bin() {
        let bins = BinMap {
            red: BinPosition(10),
            green: BinPosition(20),
            blue: BinPosition(30),
            unknown: BinPosition(180),
        };
        let labels = [
            ColorLabel::Red,
            ColorLabel::Green,
            ColorLabel::Blue,
            ColorLabel::Unknown,
        ];
        for label in labels {
            assert!(bins.bin_for(label).degrees() <= 180);
        }
        assert_eq!(bins.bin_for(ColorLabel::Unknown), BinPosition(180));
    }
}
