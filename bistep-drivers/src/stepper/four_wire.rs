//! Four-wire full-step bipolar stepper driver
//!
//! Drives both coils of a bipolar stepper directly through four output
//! lines, cycling them through the four-phase excitation sequence. No
//! dedicated driver chip is involved; the lines typically feed an
//! H-bridge pair.
//!
//! The driver never blocks. The host loop calls [`poll`] on every
//! iteration and the driver performs at most one step per call, and
//! only once the configured step interval has elapsed:
//!
//! ```ignore
//! let mut motor = FourWireStepper::new(a1, a2, b1, b2, clock, FourWireConfig::default())?;
//! motor.start(Direction::Clockwise)?;
//!
//! loop {
//!     motor.poll()?;
//!     // ... the rest of the control loop
//! }
//! ```
//!
//! [`poll`]: bistep_core::traits::StepperDriver::poll

use bistep_core::phase::{CoilPattern, Phase};
use bistep_core::timing;
use bistep_core::traits::{Clock, Direction, StepperDriver, StepperError};
use embedded_hal::digital::OutputPin;

/// Four-wire stepper configuration
#[derive(Debug, Clone)]
pub struct FourWireConfig {
    /// Phase transitions per full mechanical revolution
    pub steps_per_rev: u16,
    /// Initial speed in RPM; the sign is ignored
    pub rpm: f32,
}

impl Default for FourWireConfig {
    fn default() -> Self {
        Self {
            steps_per_rev: 200,
            rpm: 12.0,
        }
    }
}

/// Non-blocking four-wire stepper driver
///
/// Owns the four output lines and a clock. `a1`/`a2` drive the first
/// coil, `b1`/`b2` the second. All state changes happen synchronously
/// inside the caller's invocation of [`poll`], [`start`], [`stop`] or
/// [`set_speed`]; there is no interior thread or interrupt handler, so
/// the owning loop is the sole scheduler.
///
/// If the loop polls slower than the step interval, steps are delayed
/// rather than skipped ahead: the motor just turns slower than
/// commanded.
///
/// [`poll`]: StepperDriver::poll
/// [`start`]: StepperDriver::start
/// [`stop`]: StepperDriver::stop
/// [`set_speed`]: StepperDriver::set_speed
pub struct FourWireStepper<A1, A2, B1, B2, C> {
    a1: A1,
    a2: A2,
    b1: B1,
    b2: B2,
    clock: C,
    /// Current position in the excitation cycle
    phase: Phase,
    /// Commanded direction, `None` while stopped
    direction: Option<Direction>,
    steps_per_rev: u16,
    /// Minimum microseconds between two phase transitions
    step_interval_us: u32,
    /// Clock reading at the most recent step (or at construction)
    last_step_at: u32,
}

impl<A1, A2, B1, B2, C, E> FourWireStepper<A1, A2, B1, B2, C>
where
    A1: OutputPin<Error = E>,
    A2: OutputPin<Error = E>,
    B1: OutputPin<Error = E>,
    B2: OutputPin<Error = E>,
    C: Clock,
{
    /// Create a driver from four already-configured output pins.
    ///
    /// Validates the configuration but performs no pin writes; the
    /// coils stay de-energized until [`start`](StepperDriver::start).
    pub fn new(
        a1: A1,
        a2: A2,
        b1: B1,
        b2: B2,
        clock: C,
        config: FourWireConfig,
    ) -> Result<Self, StepperError> {
        let step_interval_us = timing::step_interval_micros(config.steps_per_rev, config.rpm)?;
        let last_step_at = clock.now_micros();

        Ok(Self {
            a1,
            a2,
            b1,
            b2,
            clock,
            phase: Phase::P0,
            direction: None,
            steps_per_rev: config.steps_per_rev,
            step_interval_us,
            last_step_at,
        })
    }

    /// Current position in the excitation cycle
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Configured steps per revolution
    pub fn steps_per_rev(&self) -> u16 {
        self.steps_per_rev
    }

    /// Current minimum time between steps, in microseconds
    pub fn step_interval_micros(&self) -> u32 {
        self.step_interval_us
    }

    /// Start from a signed direction value: positive is clockwise,
    /// negative counter-clockwise, zero stops the motor.
    ///
    /// Shim for control loops that carry direction as a signed integer;
    /// [`start`](StepperDriver::start) is the typed equivalent.
    pub fn start_signed(&mut self, direction: i32) -> Result<(), E> {
        match Direction::from_sign(direction) {
            Some(dir) => self.start(dir),
            None => self.stop(),
        }
    }

    /// Release the pins and clock
    pub fn release(self) -> (A1, A2, B1, B2, C) {
        (self.a1, self.a2, self.b1, self.b2, self.clock)
    }

    fn drive(&mut self, pattern: CoilPattern) -> Result<(), E> {
        self.a1.set_state(pattern.a1.into())?;
        self.a2.set_state(pattern.a2.into())?;
        self.b1.set_state(pattern.b1.into())?;
        self.b2.set_state(pattern.b2.into())?;
        Ok(())
    }

    /// Re-energize the coils at the current phase without advancing it.
    ///
    /// Called before motion resumes so the first step after a stop (or
    /// a direction reversal) is taken with full torque instead of from
    /// unpowered coils.
    fn power_up(&mut self) -> Result<(), E> {
        self.drive(self.phase.pattern())
    }

    /// Advance one phase and drive the new pattern if the step interval
    /// has elapsed.
    ///
    /// Performs at most one step regardless of how many intervals have
    /// passed since the last one; a late caller gets a slower motor,
    /// not a burst of catch-up steps.
    fn step_if_due(&mut self, dir: Direction) -> Result<(), E> {
        let now = self.clock.now_micros();
        if timing::elapsed_micros(now, self.last_step_at) >= self.step_interval_us {
            self.phase = self.phase.stepped(dir);
            self.drive(self.phase.pattern())?;
            self.last_step_at = now;
        }
        Ok(())
    }
}

impl<A1, A2, B1, B2, C, E> StepperDriver for FourWireStepper<A1, A2, B1, B2, C>
where
    A1: OutputPin<Error = E>,
    A2: OutputPin<Error = E>,
    B1: OutputPin<Error = E>,
    B2: OutputPin<Error = E>,
    C: Clock,
{
    type PinError = E;

    fn poll(&mut self) -> Result<bool, E> {
        // The stopped check is the fast path; it runs on every loop
        // iteration even when idle.
        match self.direction {
            None => Ok(true),
            Some(dir) => {
                self.step_if_due(dir)?;
                Ok(false)
            }
        }
    }

    fn start(&mut self, dir: Direction) -> Result<(), E> {
        if self.direction.is_some() {
            self.stop()?;
        }
        self.power_up()?;
        self.direction = Some(dir);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), E> {
        // Pulling all lines low saves power and avoids heat build-up
        // while idle, at the cost of holding torque.
        self.direction = None;
        self.drive(CoilPattern::OFF)
    }

    fn set_speed(&mut self, rpm: f32) -> Result<(), StepperError> {
        // Only the gate width changes; phase and the reference
        // timestamp stay untouched, so no step is forced by a speed
        // change.
        self.step_interval_us = timing::step_interval_micros(self.steps_per_rev, rpm)?;
        Ok(())
    }

    fn direction(&self) -> Option<Direction> {
        self.direction
    }
}
