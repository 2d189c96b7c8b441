//! Stepper motor driver trait
//!
//! This trait abstracts over stepper driver implementations so the
//! control loop can be written against one interface regardless of the
//! wiring (four-wire full-step today, STEP/DIR drivers later).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Motor rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Clockwise rotation
    Clockwise,
    /// Counter-clockwise rotation
    CounterClockwise,
}

impl Direction {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Decode the signed-integer direction convention used at the
    /// control-loop boundary: positive is clockwise, negative is
    /// counter-clockwise, zero means "not running".
    pub fn from_sign(direction: i32) -> Option<Self> {
        match direction {
            0 => None,
            d if d > 0 => Some(Direction::Clockwise),
            _ => Some(Direction::CounterClockwise),
        }
    }
}

/// Errors that can occur with stepper configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepperError {
    /// Speed is zero, non-finite, or yields an unrepresentable step interval
    InvalidSpeed,
    /// Steps-per-revolution count is zero
    InvalidStepsPerRev,
}

/// Trait for continuously-rotating stepper drivers
///
/// Implementations are polled from the caller's main loop and must
/// never block: `poll` either performs one due step or returns
/// immediately.
pub trait StepperDriver {
    /// Error type of the underlying output pins
    type PinError;

    /// Poll the motor and step it if a step is due.
    ///
    /// Must be called as frequently as possible, at least once per step
    /// interval; calling it late delays the step rather than faulting.
    /// Returns `Ok(true)` when the motor is stopped, `Ok(false)` while
    /// it is running.
    fn poll(&mut self) -> Result<bool, Self::PinError>;

    /// Start running in the given direction.
    ///
    /// If the motor is already running it is stopped first, then the
    /// coils are re-energized at the current phase before the new
    /// direction takes effect.
    fn start(&mut self, dir: Direction) -> Result<(), Self::PinError>;

    /// Stop the motor and de-energize the coils.
    ///
    /// Takes effect within this call; there is no holding torque while
    /// stopped.
    fn stop(&mut self) -> Result<(), Self::PinError>;

    /// Change the speed in RPM, effective at the next step check.
    fn set_speed(&mut self, rpm: f32) -> Result<(), StepperError>;

    /// Current commanded direction, `None` when stopped
    fn direction(&self) -> Option<Direction>;

    /// Check if the motor is currently running
    fn is_running(&self) -> bool {
        self.direction().is_some()
    }

    /// Check if the motor is stopped
    fn is_stopped(&self) -> bool {
        !self.is_running()
    }
}
