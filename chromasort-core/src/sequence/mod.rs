//! Pick-and-place sequencing
//!
//! The sort cycle is planned as fixed step lists per phase and executed
//! one action at a time, so the firmware task only has to perform
//! actions and report classifications.

pub mod executor;
pub mod gradual;
pub mod plan;

pub use executor::{Action, SortCycle};
pub use gradual::GradualMove;
pub use plan::{plan, Phase, SortStep, StepList, MAX_STEPS};
