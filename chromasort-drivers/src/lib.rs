//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in chromasort-core for the arm's hardware:
//!
//! - Color sensor (TCS3200/TCS230)
//! - Hobby servos on 50 Hz PWM
//! - Five-joint servo arm with gradual moves

#![no_std]
#![deny(unsafe_code)]

pub mod arm;
pub mod sensor;
pub mod servo;
