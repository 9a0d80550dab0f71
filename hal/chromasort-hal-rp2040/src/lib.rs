//! RP2040-specific HAL for the color sorting arm
//!
//! This crate provides RP2040 implementations of the shared
//! `chromasort-hal` traits, plus RP2040-specific functionality:
//!
//! - GPIO wrappers for the color sensor lines
//! - Microsecond clock backed by the embassy time driver
//! - 50 Hz PWM slice configuration for hobby servos

#![no_std]

pub mod clock;
pub mod gpio;
pub mod pwm;

pub use clock::EmbassyClock;
pub use gpio::{RpInput, RpOutput};
pub use pwm::{servo_pwm_config, SERVO_PWM_HZ};

// Re-export shared traits from chromasort-hal for convenience
pub use chromasort_hal::{InputPin, MicrosClock, OutputPin, PolledPulseInput};
