//! Color sensor drivers

pub mod tcs3200;

pub use tcs3200::{Tcs3200, Tcs3200Pins};
