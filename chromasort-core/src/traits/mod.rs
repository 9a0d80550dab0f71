//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod arm;
pub mod sensor;

pub use arm::{ArmActuator, ArmError, Joint, MAX_ANGLE};
pub use sensor::ColorSensor;
