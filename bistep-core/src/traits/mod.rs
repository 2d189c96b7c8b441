//! Hardware abstraction traits
//!
//! These traits define the interface between the stepping logic
//! and hardware-specific implementations.

pub mod clock;
pub mod stepper;

pub use clock::Clock;
pub use stepper::{Direction, StepperDriver, StepperError};
