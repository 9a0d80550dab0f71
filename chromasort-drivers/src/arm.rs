//! Five-joint servo arm
//!
//! One [`Servo`] per [`Joint`], plus a blocking delay used to pace
//! gradual moves.

use chromasort_core::sequence::GradualMove;
use chromasort_core::traits::{ArmActuator, ArmError, Joint, MAX_ANGLE};
use embedded_hal::delay::DelayNs;
use embedded_hal::pwm::SetDutyCycle;

use crate::servo::{Servo, ServoConfig};

/// Servo arm driver
pub struct ServoArm<P, D> {
    /// Indexed by [`Joint::index`]
    servos: [Servo<P>; 5],
    delay: D,
}

impl<P: SetDutyCycle, D: DelayNs> ServoArm<P, D> {
    /// Create an arm from PWM channels in joint order
    /// (base, arm, wrist, gripper tilt, gripper)
    ///
    /// Every joint starts detached.
    pub fn new(pwms: [P; 5], config: ServoConfig, delay: D) -> Result<Self, ArmError> {
        let [base, arm, wrist, tilt, gripper] = pwms;
        let servos = [
            Servo::new(base, config).map_err(|_| ArmError::Output)?,
            Servo::new(arm, config).map_err(|_| ArmError::Output)?,
            Servo::new(wrist, config).map_err(|_| ArmError::Output)?,
            Servo::new(tilt, config).map_err(|_| ArmError::Output)?,
            Servo::new(gripper, config).map_err(|_| ArmError::Output)?,
        ];
        Ok(Self { servos, delay })
    }

    fn servo(&mut self, joint: Joint) -> &mut Servo<P> {
        &mut self.servos[joint.index()]
    }

    /// Servo for `joint`, if it can move to `angle`
    fn movable(&mut self, joint: Joint, angle: u8) -> Result<&mut Servo<P>, ArmError> {
        if angle > MAX_ANGLE {
            return Err(ArmError::AngleOutOfRange);
        }
        let servo = self.servo(joint);
        if !servo.is_attached() {
            return Err(ArmError::Detached);
        }
        Ok(servo)
    }
}

impl<P: SetDutyCycle, D: DelayNs> ArmActuator for ServoArm<P, D> {
    fn set_angle(&mut self, joint: Joint, angle: u8) -> Result<(), ArmError> {
        self.movable(joint, angle)?
            .write(angle)
            .map_err(|_| ArmError::Output)
    }

    fn move_to(&mut self, joint: Joint, angle: u8, step_delay_ms: u16) -> Result<(), ArmError> {
        let from = self.movable(joint, angle)?.angle().unwrap_or(angle);

        for step in GradualMove::new(from, angle) {
            self.servo(joint).write(step).map_err(|_| ArmError::Output)?;
            self.delay.delay_ms(step_delay_ms as u32);
        }
        Ok(())
    }

    fn attach(&mut self, joint: Joint) -> Result<(), ArmError> {
        self.servo(joint).attach().map_err(|_| ArmError::Output)
    }

    fn detach(&mut self, joint: Joint) -> Result<(), ArmError> {
        self.servo(joint).detach().map_err(|_| ArmError::Output)
    }

    fn angle(&self, joint: Joint) -> Option<u8> {
        self.servos[joint.index()].angle()
    }

    fn is_attached(&self, joint: Joint) -> bool {
        self.servos[joint.index()].is_attached()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use core::convert::Infallible;

    /// One recorded PWM write: (channel, duty)
    type Log = RefCell<[(u8, u16); 256]>;

    /// PWM channel that appends writes to a shared log
    struct MockPwm<'a> {
        id: u8,
        log: &'a Log,
        len: &'a core::cell::Cell<usize>,
    }

    impl embedded_hal::pwm::ErrorType for MockPwm<'_> {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm<'_> {
        fn max_duty_cycle(&self) -> u16 {
            20_000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            let n = self.len.get();
            if n < 256 {
                self.log.borrow_mut()[n] = (self.id, duty);
                self.len.set(n + 1);
            }
            Ok(())
        }
    }

    /// Delay that counts calls and total time
    #[derive(Default)]
    struct MockDelay {
        calls: u32,
        total_ns: u64,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.calls += 1;
            self.total_ns += ns as u64;
        }
    }

    struct Rig {
        log: Log,
        len: core::cell::Cell<usize>,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                log: RefCell::new([(0, 0); 256]),
                len: core::cell::Cell::new(0),
            }
        }

        fn arm(&self) -> ServoArm<MockPwm<'_>, MockDelay> {
            let pwms = [0, 1, 2, 3, 4].map(|id| MockPwm {
                id,
                log: &self.log,
                len: &self.len,
            });
            ServoArm::new(pwms, ServoConfig::default(), MockDelay::default()).unwrap()
        }

        fn clear(&self) {
            self.len.set(0);
        }

        fn writes(&self) -> usize {
            self.len.get()
        }

        fn last(&self) -> (u8, u16) {
            self.log.borrow()[self.len.get() - 1]
        }
    }

    #[test]
    fn test_starts_detached() {
        let rig = Rig::new();
        let arm = rig.arm();
        for joint in Joint::ALL {
            assert!(!arm.is_attached(joint));
            assert_eq!(arm.angle(joint), None);
        }
    }

    #[test]
    fn test_detached_joint_rejects_moves() {
        let rig = Rig::new();
        let mut arm = rig.arm();
        assert_eq!(arm.set_angle(Joint::Wrist, 90), Err(ArmError::Detached));
        assert_eq!(arm.move_to(Joint::Wrist, 90, 15), Err(ArmError::Detached));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let rig = Rig::new();
        let mut arm = rig.arm();
        arm.attach(Joint::Base).unwrap();
        assert_eq!(
            arm.set_angle(Joint::Base, 181),
            Err(ArmError::AngleOutOfRange)
        );
        assert_eq!(arm.angle(Joint::Base), None);
    }

    #[test]
    fn test_set_angle_writes_once() {
        let rig = Rig::new();
        let mut arm = rig.arm();
        arm.attach(Joint::Arm).unwrap();
        rig.clear();

        arm.set_angle(Joint::Arm, 90).unwrap();
        assert_eq!(rig.writes(), 1);
        assert_eq!(rig.last(), (1, 1500));
        assert_eq!(arm.angle(Joint::Arm), Some(90));
    }

    #[test]
    fn test_move_steps_one_degree_with_delay() {
        let rig = Rig::new();
        let mut arm = rig.arm();
        arm.attach(Joint::Gripper).unwrap();
        arm.set_angle(Joint::Gripper, 70).unwrap();
        rig.clear();

        arm.move_to(Joint::Gripper, 0, 15).unwrap();

        // 70, 69, ..., 0
        assert_eq!(rig.writes(), 71);
        assert_eq!(rig.last(), (4, 500));
        assert_eq!(arm.delay.total_ns, 71 * 15_000_000);
        assert_eq!(arm.angle(Joint::Gripper), Some(0));
    }

    #[test]
    fn test_move_without_known_angle_jumps() {
        let rig = Rig::new();
        let mut arm = rig.arm();
        arm.attach(Joint::Base).unwrap();
        rig.clear();

        arm.move_to(Joint::Base, 60, 20).unwrap();
        assert_eq!(rig.writes(), 1);
        assert_eq!(arm.angle(Joint::Base), Some(60));
    }

    #[test]
    fn test_detach_and_reattach_restores_angle() {
        let rig = Rig::new();
        let mut arm = rig.arm();
        arm.attach(Joint::Gripper).unwrap();
        arm.set_angle(Joint::Gripper, 0).unwrap();

        arm.detach(Joint::Gripper).unwrap();
        assert_eq!(rig.last(), (4, 0));
        assert!(!arm.is_attached(Joint::Gripper));

        arm.attach(Joint::Gripper).unwrap();
        assert_eq!(rig.last(), (4, 500));
    }
}
