//! Configuration type definitions
//!
//! Classifier tuning and arm choreography settings.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::{ClassifierPolicy, DominanceMargin, ValidRange};

/// Classification policy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClassifierKind {
    /// Strict minimum of the raw readings
    NaiveArgmin,
    /// Strict minimum below `ceiling`
    ThresholdedArgmin,
    /// Valid-range gate plus dominance margin
    #[default]
    ValidatedDominance,
}

impl ClassifierKind {
    /// Parse the config spelling
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "naive_argmin" => Some(ClassifierKind::NaiveArgmin),
            "thresholded_argmin" => Some(ClassifierKind::ThresholdedArgmin),
            "validated_dominance" => Some(ClassifierKind::ValidatedDominance),
            _ => None,
        }
    }
}

/// Classifier configuration
///
/// Fields that do not apply to the selected policy are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ClassifierConfig {
    /// Policy to use
    pub policy: ClassifierKind,
    /// Smallest trusted pulse width (µs, inclusive)
    pub min_valid: u32,
    /// Largest trusted pulse width (µs, inclusive)
    pub max_valid: u32,
    /// Dominance factor in permille (900 = 0.9)
    pub dominance_permille: u16,
    /// Upper bound for the thresholded policy (µs, exclusive)
    pub ceiling: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            policy: ClassifierKind::ValidatedDominance,
            min_valid: ValidRange::CALIBRATED.min,
            max_valid: ValidRange::CALIBRATED.max,
            dominance_permille: DominanceMargin::DEFAULT.permille(),
            ceiling: 50,
        }
    }
}

impl ClassifierConfig {
    /// Build the policy this config describes
    pub fn policy(&self) -> ClassifierPolicy {
        match self.policy {
            ClassifierKind::NaiveArgmin => ClassifierPolicy::NaiveArgmin,
            ClassifierKind::ThresholdedArgmin => ClassifierPolicy::ThresholdedArgmin {
                ceiling: self.ceiling,
            },
            ClassifierKind::ValidatedDominance => ClassifierPolicy::ValidatedDominance {
                range: ValidRange::new(self.min_valid, self.max_valid),
                margin: DominanceMargin::from_permille(self.dominance_permille),
            },
        }
    }
}

/// Arm poses and motion timing
///
/// Angles are in degrees. See [`crate::traits::Joint`] for what each
/// joint's range means physically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ArmConfig {
    /// Base angle facing the pickup spot
    pub base_pick: u8,
    /// Arm folded back
    pub arm_rest: u8,
    /// Arm halfway, clear of the table
    pub arm_mid: u8,
    /// Arm reaching the object
    pub arm_pick: u8,
    /// Arm lowered over a bin (short of `arm_pick`)
    pub arm_release: u8,
    /// Wrist angled for picking
    pub wrist_pick: u8,
    /// Wrist angled for carrying
    pub wrist_lift: u8,
    /// Gripper tilt at rest
    pub tilt_initial: u8,
    /// Gripper tilt while gripping
    pub tilt_grip: u8,
    /// Gripper jaws open
    pub gripper_open: u8,
    /// Gripper jaws closed
    pub gripper_closed: u8,
    /// Per-degree delay for arm, wrist and gripper moves (ms)
    pub step_delay_ms: u16,
    /// Per-degree delay for base moves (ms)
    pub base_step_delay_ms: u16,
    /// Pause after each move (ms)
    pub settle_ms: u32,
    /// Pause after base moves and after dropping an object (ms)
    pub long_settle_ms: u32,
    /// Pause after re-attaching the gripper (ms)
    pub attach_settle_ms: u32,
    /// Pause after the pick phase and after the release phase (ms)
    pub phase_gap_ms: u32,
    /// Pause between sort cycles (ms)
    pub cycle_pause_ms: u32,
    /// Pause after homing, before the first pick (ms)
    pub ready_ms: u32,
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            base_pick: 0,
            arm_rest: 0,
            arm_mid: 60,
            arm_pick: 140,
            arm_release: 120,
            wrist_pick: 90,
            wrist_lift: 0,
            tilt_initial: 90,
            tilt_grip: 150,
            gripper_open: 70,
            gripper_closed: 0,
            step_delay_ms: 15,
            base_step_delay_ms: 20,
            settle_ms: 1000,
            long_settle_ms: 2000,
            attach_settle_ms: 500,
            phase_gap_ms: 1000,
            cycle_pause_ms: 3000,
            ready_ms: 2000,
        }
    }
}

impl ArmConfig {
    /// All configured angles (for range checks)
    pub fn angles(&self) -> [u8; 11] {
        [
            self.base_pick,
            self.arm_rest,
            self.arm_mid,
            self.arm_pick,
            self.arm_release,
            self.wrist_pick,
            self.wrist_lift,
            self.tilt_initial,
            self.tilt_grip,
            self.gripper_open,
            self.gripper_closed,
        ]
    }
}
