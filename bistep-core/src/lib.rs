//! Board-agnostic core logic for the bistep stepper driver
//!
//! This crate contains everything that does not depend on specific
//! hardware implementations:
//!
//! - Hardware abstraction traits (stepper driver, clock)
//! - The four-phase excitation state machine
//! - Step-interval derivation and wraparound-safe elapsed-time math

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod phase;
pub mod timing;
pub mod traits;
