//! Servo drivers

pub mod pwm;

pub use pwm::{Servo, ServoConfig};
