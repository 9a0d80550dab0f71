//! Hobby servo on a 50 Hz PWM channel
//!
//! The servo angle is set by the width of a pulse repeated every 20 ms:
//! 500 µs is 0° and 2500 µs is 180° on the reference servos (SG90/MG996R).
//! Detaching drives the output to 0% duty, which makes the servo stop
//! holding its position.

use chromasort_core::traits::MAX_ANGLE;
use embedded_hal::pwm::SetDutyCycle;

/// PWM period for a 50 Hz servo signal
pub const PERIOD_US: u16 = 20_000;

/// Servo pulse calibration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoConfig {
    /// Pulse width at 0°
    pub min_pulse_us: u16,
    /// Pulse width at 180°
    pub max_pulse_us: u16,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            min_pulse_us: 500,
            max_pulse_us: 2500,
        }
    }
}

impl ServoConfig {
    /// Pulse width for an angle (clamped to 180°)
    pub fn pulse_us(&self, angle: u8) -> u16 {
        let angle = angle.min(MAX_ANGLE) as u32;
        let span = self.max_pulse_us.saturating_sub(self.min_pulse_us) as u32;
        self.min_pulse_us + (angle * span / MAX_ANGLE as u32) as u16
    }
}

/// Single hobby servo
pub struct Servo<P> {
    pwm: P,
    config: ServoConfig,
    /// Last written angle
    angle: Option<u8>,
    attached: bool,
}

impl<P: SetDutyCycle> Servo<P> {
    /// Create a detached servo
    ///
    /// The output is driven to 0% duty until [`Servo::attach`] is called.
    pub fn new(mut pwm: P, config: ServoConfig) -> Result<Self, P::Error> {
        pwm.set_duty_cycle_fully_off()?;
        Ok(Self {
            pwm,
            config,
            angle: None,
            attached: false,
        })
    }

    /// Write an angle (clamped to 180°)
    ///
    /// While detached the angle is only remembered and is output on the
    /// next attach.
    pub fn write(&mut self, angle: u8) -> Result<(), P::Error> {
        let angle = angle.min(MAX_ANGLE);
        self.angle = Some(angle);
        if self.attached {
            self.output(angle)?;
        }
        Ok(())
    }

    /// Start driving the output, at the last written angle if any
    pub fn attach(&mut self) -> Result<(), P::Error> {
        self.attached = true;
        if let Some(angle) = self.angle {
            self.output(angle)?;
        }
        Ok(())
    }

    /// Stop driving the output
    pub fn detach(&mut self) -> Result<(), P::Error> {
        self.attached = false;
        self.pwm.set_duty_cycle_fully_off()
    }

    /// Last written angle
    pub fn angle(&self) -> Option<u8> {
        self.angle
    }

    /// Check if the output is driven
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    fn output(&mut self, angle: u8) -> Result<(), P::Error> {
        let pulse = self.config.pulse_us(angle);
        self.pwm.set_duty_cycle_fraction(pulse, PERIOD_US)
    }
}
