//! Sort cycle executor
//!
//! Walks the phase plans one step at a time and hands out concrete
//! [`Action`]s. The caller performs each action (moving servos, waiting,
//! reading the sensor) and reports the classification back so the bin
//! move can be resolved.

use super::plan::{plan, Phase, SortStep, StepList};
use crate::color::{BinMap, BinPosition, ColorLabel};
use crate::config::ArmConfig;
use crate::traits::{ArmActuator, ArmError, Joint};

/// Concrete action for the caller to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Write an angle immediately
    SetAngle { joint: Joint, angle: u8 },
    /// Walk to an angle one degree at a time
    Move {
        joint: Joint,
        angle: u8,
        step_delay_ms: u16,
    },
    /// Enable a joint's output
    Attach(Joint),
    /// Disable a joint's output
    Detach(Joint),
    /// Wait
    Dwell { ms: u32 },
    /// Sample the sensor, then call [`SortCycle::record_classification`]
    Classify,
}

impl Action {
    /// Perform an arm action
    ///
    /// `Dwell` and `Classify` are left to the caller and do nothing here.
    pub fn apply<A: ArmActuator>(self, arm: &mut A) -> Result<(), ArmError> {
        match self {
            Action::SetAngle { joint, angle } => arm.set_angle(joint, angle),
            Action::Move {
                joint,
                angle,
                step_delay_ms,
            } => arm.move_to(joint, angle, step_delay_ms),
            Action::Attach(joint) => arm.attach(joint),
            Action::Detach(joint) => arm.detach(joint),
            Action::Dwell { .. } | Action::Classify => Ok(()),
        }
    }
}

/// Endless pick-classify-place loop
#[derive(Debug, Clone)]
pub struct SortCycle {
    arm: ArmConfig,
    bins: BinMap,
    phase: Phase,
    steps: StepList,
    index: usize,
    /// Label recorded for the object currently held
    label: Option<ColorLabel>,
    /// Objects placed so far
    cycles: u32,
}

impl SortCycle {
    /// Create a cycle starting at [`Phase::Homing`]
    pub fn new(arm: ArmConfig, bins: BinMap) -> Self {
        Self {
            steps: plan(Phase::Homing, &arm),
            arm,
            bins,
            phase: Phase::Homing,
            index: 0,
            label: None,
            cycles: 0,
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of completed pick-and-place cycles
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Label recorded for the held object, if any
    pub fn label(&self) -> Option<ColorLabel> {
        self.label
    }

    /// Bin the held object is going to
    ///
    /// Until a classification is recorded this is the Unknown bin.
    pub fn target_bin(&self) -> BinPosition {
        self.bins.bin_for(self.label.unwrap_or(ColorLabel::Unknown))
    }

    /// Report the color read for the held object
    pub fn record_classification(&mut self, label: ColorLabel) {
        self.label = Some(label);
    }

    /// Produce the next action
    ///
    /// Never runs out: after the pause the cycle starts picking again.
    pub fn next_action(&mut self) -> Action {
        while self.index >= self.steps.len() {
            self.advance_phase();
        }

        let step = self.steps[self.index];
        self.index += 1;
        self.resolve(step)
    }

    fn advance_phase(&mut self) {
        if self.phase == Phase::Releasing {
            self.cycles = self.cycles.wrapping_add(1);
        }

        self.phase = self.phase.next();
        if self.phase == Phase::Picking {
            self.label = None;
        }

        self.steps = plan(self.phase, &self.arm);
        self.index = 0;
    }

    fn resolve(&self, step: SortStep) -> Action {
        match step {
            SortStep::SetAngle { joint, angle } => Action::SetAngle { joint, angle },
            SortStep::Move {
                joint,
                angle,
                step_delay_ms,
            } => Action::Move {
                joint,
                angle,
                step_delay_ms,
            },
            SortStep::MoveToBin { step_delay_ms } => Action::Move {
                joint: Joint::Base,
                angle: self.target_bin().degrees(),
                step_delay_ms,
            },
            SortStep::Attach(joint) => Action::Attach(joint),
            SortStep::Detach(joint) => Action::Detach(joint),
            SortStep::Dwell { ms } => Action::Dwell { ms },
            SortStep::Classify => Action::Classify,
        }
    }
}
