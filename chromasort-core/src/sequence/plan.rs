//! Sort cycle choreography
//!
//! Each phase of the cycle is a fixed list of steps generated from the arm
//! config. The only step whose target is not known up front is
//! [`SortStep::MoveToBin`], which depends on the color read mid-pick.

use heapless::Vec;

use crate::config::ArmConfig;
use crate::traits::Joint;

/// Maximum steps in one phase
pub const MAX_STEPS: usize = 32;

/// Step list for one phase
pub type StepList = Vec<SortStep, MAX_STEPS>;

/// Cycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Bring every joint to its starting pose (once, at power-on)
    Homing,
    /// Grab the object, read its color, carry it to its bin
    Picking,
    /// Drop the object and return to the pickup pose
    Releasing,
    /// Pause before the next object
    Complete,
}

impl Phase {
    /// Phase that follows this one
    pub const fn next(self) -> Phase {
        match self {
            Phase::Homing => Phase::Picking,
            Phase::Picking => Phase::Releasing,
            Phase::Releasing => Phase::Complete,
            Phase::Complete => Phase::Picking,
        }
    }
}

/// A single step of the choreography
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SortStep {
    /// Write an angle immediately
    SetAngle { joint: Joint, angle: u8 },
    /// Walk to an angle one degree at a time
    Move {
        joint: Joint,
        angle: u8,
        step_delay_ms: u16,
    },
    /// Walk the base to the bin for the current object
    MoveToBin { step_delay_ms: u16 },
    /// Enable a joint's output
    Attach(Joint),
    /// Disable a joint's output
    Detach(Joint),
    /// Wait
    Dwell { ms: u32 },
    /// Sample the sensor and classify the held object
    Classify,
}

/// Step list builder
///
/// Phase lengths are fixed and well under [`MAX_STEPS`]. Pushing past the
/// capacity panics in debug builds.
struct Builder<'a> {
    steps: StepList,
    arm: &'a ArmConfig,
}

impl<'a> Builder<'a> {
    fn new(arm: &'a ArmConfig) -> Self {
        Self {
            steps: Vec::new(),
            arm,
        }
    }

    fn push(&mut self, step: SortStep) -> &mut Self {
        let pushed = self.steps.push(step).is_ok();
        debug_assert!(pushed, "phase exceeds MAX_STEPS");
        self
    }

    fn set(&mut self, joint: Joint, angle: u8) -> &mut Self {
        self.push(SortStep::SetAngle { joint, angle })
    }

    /// Gradual move at the arm step delay
    fn walk(&mut self, joint: Joint, angle: u8) -> &mut Self {
        let step_delay_ms = match joint {
            Joint::Base => self.arm.base_step_delay_ms,
            _ => self.arm.step_delay_ms,
        };
        self.push(SortStep::Move {
            joint,
            angle,
            step_delay_ms,
        })
    }

    fn settle(&mut self) -> &mut Self {
        let ms = self.arm.settle_ms;
        self.push(SortStep::Dwell { ms })
    }

    fn long_settle(&mut self) -> &mut Self {
        let ms = self.arm.long_settle_ms;
        self.push(SortStep::Dwell { ms })
    }

    fn dwell(&mut self, ms: u32) -> &mut Self {
        self.push(SortStep::Dwell { ms })
    }

    fn finish(&mut self) -> StepList {
        core::mem::take(&mut self.steps)
    }
}

/// Generate the steps for a phase
pub fn plan(phase: Phase, arm: &ArmConfig) -> StepList {
    match phase {
        Phase::Homing => home(arm),
        Phase::Picking => pick(arm),
        Phase::Releasing => release(arm),
        Phase::Complete => Builder::new(arm).dwell(arm.cycle_pause_ms).finish(),
    }
}

fn home(arm: &ArmConfig) -> StepList {
    let mut b = Builder::new(arm);

    for joint in Joint::ALL {
        b.push(SortStep::Attach(joint));
    }

    // Gripper test: open fully and close again
    b.set(Joint::Gripper, arm.gripper_closed);
    b.walk(Joint::Gripper, arm.gripper_open).settle();
    b.walk(Joint::Gripper, arm.gripper_closed).settle();

    b.set(Joint::Base, arm.base_pick).settle();
    b.set(Joint::Arm, arm.arm_rest).settle();
    b.set(Joint::Wrist, arm.wrist_pick).settle();
    b.set(Joint::GripperTilt, arm.tilt_initial).settle();

    // Close from fully open so the jaws end in a known state
    b.set(Joint::Gripper, arm.gripper_open);
    b.walk(Joint::Gripper, arm.gripper_closed).settle();

    b.dwell(arm.ready_ms);

    b.finish()
}

fn pick(arm: &ArmConfig) -> StepList {
    let mut b = Builder::new(arm);

    b.push(SortStep::Attach(Joint::Gripper)).dwell(arm.attach_settle_ms);

    b.walk(Joint::Arm, arm.arm_mid).settle();
    b.walk(Joint::GripperTilt, arm.tilt_grip).settle();
    b.walk(Joint::Gripper, arm.gripper_open).settle();
    b.walk(Joint::Arm, arm.arm_pick).settle();
    b.walk(Joint::Gripper, arm.gripper_closed).settle();

    // Stop holding torque while carrying
    b.push(SortStep::Detach(Joint::Gripper)).settle();

    b.walk(Joint::Arm, arm.arm_mid).settle();
    b.push(SortStep::Classify).settle();
    b.walk(Joint::Wrist, arm.wrist_lift).settle();
    b.walk(Joint::Arm, arm.arm_rest).settle();

    b.push(SortStep::MoveToBin {
        step_delay_ms: arm.base_step_delay_ms,
    });
    b.long_settle().dwell(arm.phase_gap_ms);

    b.finish()
}

fn release(arm: &ArmConfig) -> StepList {
    let mut b = Builder::new(arm);

    b.walk(Joint::Arm, arm.arm_mid).settle();
    b.walk(Joint::Wrist, arm.wrist_pick).settle();
    b.walk(Joint::Arm, arm.arm_release).settle();

    b.push(SortStep::Attach(Joint::Gripper)).settle();
    b.walk(Joint::Gripper, arm.gripper_open).long_settle();

    b.walk(Joint::Arm, arm.arm_mid).settle();
    b.walk(Joint::Gripper, arm.gripper_closed).settle();
    b.walk(Joint::GripperTilt, arm.tilt_initial).settle();
    b.walk(Joint::Arm, arm.arm_rest).settle();
    b.walk(Joint::Base, arm.base_pick).long_settle();

    b.push(SortStep::Detach(Joint::Gripper)).dwell(arm.phase_gap_ms);

    b.finish()
}
