//! Configuration types
//!
//! Board-agnostic machine configuration. Every field defaults to the
//! values the reference arm was tuned with, so an empty config file is a
//! working config.

pub mod hardware;
pub mod parse;
pub mod types;

pub use hardware::*;
pub use parse::{parse_config, ParseError};
pub use types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::BinMap;
use crate::traits::MAX_ANGLE;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A servo angle or bin position exceeds 180°
    AngleOutOfRange,
    /// `min_valid` is greater than `max_valid`
    EmptyValidRange,
    /// `dominance_permille` exceeds 1000
    MarginOutOfRange,
    /// Pulse timeout is zero
    ZeroTimeout,
}

/// Complete machine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct MachineConfig {
    /// Color sensor timing and scaling
    pub sensor: SensorConfig,
    /// Classification policy
    pub classifier: ClassifierConfig,
    /// Drop-off bin per color
    pub bins: BinMap,
    /// Arm poses and motion timing
    pub arm: ArmConfig,
}

impl MachineConfig {
    /// Create a config with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the config for values the hardware cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sensor.timeout_us == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        if self.classifier.min_valid > self.classifier.max_valid {
            return Err(ConfigError::EmptyValidRange);
        }

        if self.classifier.dominance_permille > 1000 {
            return Err(ConfigError::MarginOutOfRange);
        }

        let bins = [
            self.bins.red,
            self.bins.green,
            self.bins.blue,
            self.bins.unknown,
        ];
        if bins.iter().any(|b| b.degrees() > MAX_ANGLE) {
            return Err(ConfigError::AngleOutOfRange);
        }

        if self.arm.angles().iter().any(|&a| a > MAX_ANGLE) {
            return Err(ConfigError::AngleOutOfRange);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BinPosition;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(MachineConfig::new().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = MachineConfig::new();
        config.bins.green = BinPosition(200);
        assert_eq!(config.validate(), Err(ConfigError::AngleOutOfRange));

        let mut config = MachineConfig::new();
        config.arm.arm_pick = 181;
        assert_eq!(config.validate(), Err(ConfigError::AngleOutOfRange));

        let mut config = MachineConfig::new();
        config.classifier.min_valid = 200;
        assert_eq!(config.validate(), Err(ConfigError::EmptyValidRange));

        let mut config = MachineConfig::new();
        config.classifier.dominance_permille = 1001;
        assert_eq!(config.validate(), Err(ConfigError::MarginOutOfRange));

        let mut config = MachineConfig::new();
        config.sensor.timeout_us = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));
    }
}
