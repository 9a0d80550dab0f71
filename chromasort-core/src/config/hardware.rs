//! Hardware configuration types
//!
//! Settings for the color sensor. Pin assignments are board-specific and
//! live in the firmware.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// TCS3200 output frequency scaling (S0, S1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FrequencyScaling {
    /// Output disabled
    #[cfg_attr(feature = "serde", serde(rename = "off"))]
    PowerDown,
    /// 2% of full-scale frequency
    #[cfg_attr(feature = "serde", serde(rename = "2%"))]
    Percent2,
    /// 20% of full-scale frequency
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "20%"))]
    Percent20,
    /// Full-scale frequency
    #[cfg_attr(feature = "serde", serde(rename = "100%"))]
    Percent100,
}

impl FrequencyScaling {
    /// S0, S1 levels for this scaling
    pub const fn pins(self) -> (bool, bool) {
        match self {
            FrequencyScaling::PowerDown => (false, false),
            FrequencyScaling::Percent2 => (false, true),
            FrequencyScaling::Percent20 => (true, false),
            FrequencyScaling::Percent100 => (true, true),
        }
    }

    /// Parse the config spelling ("off", "2%", "20%", "100%")
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "off" => Some(FrequencyScaling::PowerDown),
            "2%" => Some(FrequencyScaling::Percent2),
            "20%" => Some(FrequencyScaling::Percent20),
            "100%" => Some(FrequencyScaling::Percent100),
            _ => None,
        }
    }
}

/// Color sensor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SensorConfig {
    /// Output frequency scaling
    pub frequency_scaling: FrequencyScaling,
    /// Wait after switching channels before measuring (ms)
    ///
    /// Must cover the sensor's response time; the calibrated valid range was
    /// recorded with 150 ms.
    pub settling_ms: u16,
    /// Give up on a pulse after this long (µs)
    pub timeout_us: u32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            frequency_scaling: FrequencyScaling::Percent20,
            settling_ms: 150,
            timeout_us: 1_000_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaling_pins() {
        assert_eq!(FrequencyScaling::Percent20.pins(), (true, false));
        assert_eq!(FrequencyScaling::PowerDown.pins(), (false, false));
        assert_eq!(FrequencyScaling::Percent100.pins(), (true, true));
    }

    #[test]
    fn test_scaling_names() {
        assert_eq!(FrequencyScaling::from_name("2%"), Some(FrequencyScaling::Percent2));
        assert_eq!(FrequencyScaling::from_name("off"), Some(FrequencyScaling::PowerDown));
        assert_eq!(FrequencyScaling::from_name("50%"), None);
    }
}
