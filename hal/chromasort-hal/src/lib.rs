//! Chromasort Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that chip-specific HALs
//! implement, so the sensor and arm drivers stay board-agnostic.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │  Drivers (chromasort-drivers)             │
//! └───────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌───────────────────────────────────────────┐
//! │  chromasort-hal (this crate - traits)     │
//! └───────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌───────────────────────────────────────────┐
//! │  chromasort-hal-rp2040                    │
//! └───────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`clock::MicrosClock`] - Free-running microsecond time base
//! - [`pulse::PulseInput`] - Bounded pulse-width measurement

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;
pub mod pulse;

// Re-export key traits at crate root for convenience
pub use clock::MicrosClock;
pub use gpio::{InputPin, OutputPin};
pub use pulse::{PolledPulseInput, PulseError, PulseInput, PulseLevel};
