//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in bistep-core:
//!
//! - Stepper drivers (four-wire full-step)

#![no_std]
#![deny(unsafe_code)]

pub mod stepper;
