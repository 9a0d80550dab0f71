//! Firmware tasks
//!
//! A single sorting loop owns the sensor and the arm.

pub mod sorter;

pub use sorter::{report, sort_loop};
