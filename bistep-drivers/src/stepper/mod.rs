//! Stepper driver implementations

pub mod four_wire;

pub use four_wire::{FourWireConfig, FourWireStepper};
