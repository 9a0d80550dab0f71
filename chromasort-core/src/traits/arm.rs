//! Servo arm trait
//!
//! The arm is driven open-loop: commands are servo angles, and nothing
//! reports back whether a joint actually got there.

/// Largest angle a hobby servo accepts
pub const MAX_ANGLE: u8 = 180;

/// Arm joints, base to gripper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Joint {
    /// Horizontal rotation (0 = pickup, bins to the left)
    Base,
    /// Arm segment (0 = rest, 140 = reaching down to the object)
    Arm,
    /// Joint between arm and gripper (90 = picking, 0 = lifting)
    Wrist,
    /// Gripper orientation (90 = initial, 150 = gripping)
    GripperTilt,
    /// Gripper jaws (0 = closed, 70 = open)
    Gripper,
}

impl Joint {
    /// All joints
    pub const ALL: [Joint; 5] = [
        Joint::Base,
        Joint::Arm,
        Joint::Wrist,
        Joint::GripperTilt,
        Joint::Gripper,
    ];

    /// Index into per-joint arrays
    pub const fn index(self) -> usize {
        match self {
            Joint::Base => 0,
            Joint::Arm => 1,
            Joint::Wrist => 2,
            Joint::GripperTilt => 3,
            Joint::Gripper => 4,
        }
    }
}

/// Errors that can occur when driving the arm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArmError {
    /// Requested angle is beyond [`MAX_ANGLE`]
    AngleOutOfRange,
    /// Joint output is detached and cannot move
    Detached,
    /// The PWM output rejected the duty cycle
    Output,
}

/// Trait for servo arms
///
/// Movement calls block until the commanded angle has been written (for
/// gradual moves: until every intermediate step has been written and its
/// step delay has elapsed).
pub trait ArmActuator {
    /// Write an angle immediately
    fn set_angle(&mut self, joint: Joint, angle: u8) -> Result<(), ArmError>;

    /// Walk from the current angle to `angle`, one degree per `step_delay_ms`
    fn move_to(&mut self, joint: Joint, angle: u8, step_delay_ms: u16) -> Result<(), ArmError>;

    /// Enable the joint's output, restoring its last angle
    fn attach(&mut self, joint: Joint) -> Result<(), ArmError>;

    /// Disable the joint's output (the servo stops holding position)
    fn detach(&mut self, joint: Joint) -> Result<(), ArmError>;

    /// Last commanded angle, if any
    fn angle(&self, joint: Joint) -> Option<u8>;

    /// Check if the joint's output is enabled
    fn is_attached(&self, joint: Joint) -> bool;
}
