//! Step timing
//!
//! Derives the minimum elapsed time between two phase transitions from
//! the motor geometry and the requested speed, and provides the
//! wraparound-safe elapsed-time arithmetic the poll gate relies on.

use crate::traits::StepperError;
use micromath::F32Ext;

/// Microseconds in one minute, the base of the RPM conversion
pub const MICROS_PER_MINUTE: u32 = 60_000_000;

/// Microseconds between steps for `rpm` on a motor with
/// `steps_per_rev` steps per revolution.
///
/// The sign of `rpm` is ignored; direction is commanded separately.
/// Returns [`StepperError::InvalidSpeed`] when the speed is zero,
/// non-finite, or would produce an interval outside `1..=u32::MAX`
/// microseconds, and [`StepperError::InvalidStepsPerRev`] for a
/// zero step count.
pub fn step_interval_micros(steps_per_rev: u16, rpm: f32) -> Result<u32, StepperError> {
    if steps_per_rev == 0 {
        return Err(StepperError::InvalidStepsPerRev);
    }

    let steps_per_minute = steps_per_rev as f32 * F32Ext::abs(rpm);
    let interval = MICROS_PER_MINUTE as f32 / steps_per_minute;

    // NaN fails both comparisons, infinity fails the upper bound
    if !(interval >= 1.0 && interval <= u32::MAX as f32) {
        return Err(StepperError::InvalidSpeed);
    }

    Ok(interval as u32)
}

/// Microseconds elapsed between a `earlier` reading and `now`.
///
/// Computed with wrapping subtraction so the result stays correct when
/// the counter has rolled over between the two readings.
pub fn elapsed_micros(now: u32, earlier: u32) -> u32 {
    now.wrapping_sub(earlier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_interval_for_typical_motor() {
        // 200 steps/rev at 15 RPM: 3000 steps/min -> 20 ms/step
        assert_eq!(step_interval_micros(200, 15.0), Ok(20_000));
        // 48 steps/rev at 60 RPM -> one step every ~20.8 ms
        assert_eq!(step_interval_micros(48, 60.0), Ok(20_833));
    }

    #[test]
    fn test_sign_of_rpm_is_ignored() {
        assert_eq!(
            step_interval_micros(200, -15.0),
            step_interval_micros(200, 15.0)
        );
    }

    #[test]
    fn test_zero_speed_rejected() {
        assert_eq!(step_interval_micros(200, 0.0), Err(StepperError::InvalidSpeed));
        assert_eq!(step_interval_micros(200, -0.0), Err(StepperError::InvalidSpeed));
    }

    #[test]
    fn test_non_finite_speed_rejected() {
        assert_eq!(
            step_interval_micros(200, f32::NAN),
            Err(StepperError::InvalidSpeed)
        );
        assert_eq!(
            step_interval_micros(200, f32::INFINITY),
            Err(StepperError::InvalidSpeed)
        );
    }

    #[test]
    fn test_sub_microsecond_interval_rejected() {
        // 60000 steps/rev at 10000 RPM would need steps every 0.1 us
        assert_eq!(
            step_interval_micros(60_000, 10_000.0),
            Err(StepperError::InvalidSpeed)
        );
    }

    #[test]
    fn test_interval_overflow_rejected() {
        // Slow enough that the interval no longer fits the counter width
        assert_eq!(
            step_interval_micros(1, 1.0e-5),
            Err(StepperError::InvalidSpeed)
        );
    }

    #[test]
    fn test_zero_steps_per_rev_rejected() {
        assert_eq!(
            step_interval_micros(0, 15.0),
            Err(StepperError::InvalidStepsPerRev)
        );
    }

    #[test]
    fn test_elapsed_across_counter_wrap() {
        // Last step just before rollover, now just after
        assert_eq!(elapsed_micros(5, u32::MAX - 9), 15);
        assert_eq!(elapsed_micros(0, u32::MAX), 1);
    }

    proptest! {
        #[test]
        fn elapsed_is_exact_for_any_offset(earlier: u32, delta: u32) {
            prop_assert_eq!(elapsed_micros(earlier.wrapping_add(delta), earlier), delta);
        }
    }
}
