//! Board-agnostic core logic for the color sorting arm
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Channel readings and color classification policies
//! - Color label to drop-off bin mapping
//! - Hardware abstraction traits (color sensor, servo arm)
//! - Sort cycle plan and executor
//! - Configuration type definitions and parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod sequence;
pub mod traits;
