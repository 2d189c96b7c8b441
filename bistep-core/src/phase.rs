//! Four-phase excitation state machine
//!
//! A bipolar stepper is driven by energizing its two coil pairs in a
//! fixed four-step sequence. [`Phase`] is the position in that
//! sequence and [`CoilPattern`] the four output levels belonging to
//! it. One phase transition is one mechanical step.

use crate::traits::Direction;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position in the four-step excitation cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    /// Coil A forward, coil B reverse
    #[default]
    P0,
    /// Coil A forward, coil B forward
    P1,
    /// Coil A reverse, coil B forward
    P2,
    /// Coil A reverse, coil B reverse
    P3,
}

/// Number of phases in one excitation cycle
pub const PHASES_PER_CYCLE: u8 = 4;

impl Phase {
    /// Cycle index of this phase (0..=3)
    pub fn index(self) -> u8 {
        match self {
            Phase::P0 => 0,
            Phase::P1 => 1,
            Phase::P2 => 2,
            Phase::P3 => 3,
        }
    }

    /// Convert a raw cycle index back to a phase.
    ///
    /// Out-of-range indices normalize to [`Phase::P0`]. Internally a
    /// phase can never leave the cycle, so this only matters when a
    /// phase is reconstructed from external data.
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => Phase::P0,
            1 => Phase::P1,
            2 => Phase::P2,
            3 => Phase::P3,
            _ => Phase::P0,
        }
    }

    /// Next phase when stepping clockwise: 0 -> 3 -> 2 -> 1 -> 0
    pub fn clockwise(self) -> Self {
        match self {
            Phase::P0 => Phase::P3,
            Phase::P1 => Phase::P0,
            Phase::P2 => Phase::P1,
            Phase::P3 => Phase::P2,
        }
    }

    /// Next phase when stepping counter-clockwise: 0 -> 1 -> 2 -> 3 -> 0
    pub fn counter_clockwise(self) -> Self {
        match self {
            Phase::P0 => Phase::P1,
            Phase::P1 => Phase::P2,
            Phase::P2 => Phase::P3,
            Phase::P3 => Phase::P0,
        }
    }

    /// Next phase when stepping in `dir`
    pub fn stepped(self, dir: Direction) -> Self {
        match dir {
            Direction::Clockwise => self.clockwise(),
            Direction::CounterClockwise => self.counter_clockwise(),
        }
    }

    /// Output levels that energize the coils for this phase
    pub fn pattern(self) -> CoilPattern {
        match self {
            Phase::P0 => CoilPattern { a1: true, a2: false, b1: false, b2: true },
            Phase::P1 => CoilPattern { a1: true, a2: false, b1: true, b2: false },
            Phase::P2 => CoilPattern { a1: false, a2: true, b1: true, b2: false },
            Phase::P3 => CoilPattern { a1: false, a2: true, b1: false, b2: true },
        }
    }
}

/// Logic levels for the four output lines, `true` = high
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoilPattern {
    /// First line of coil A
    pub a1: bool,
    /// Second line of coil A
    pub a2: bool,
    /// First line of coil B
    pub b1: bool,
    /// Second line of coil B
    pub b2: bool,
}

impl CoilPattern {
    /// All lines low: both coils de-energized
    pub const OFF: Self = CoilPattern {
        a1: false,
        a2: false,
        b1: false,
        b2: false,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clockwise_cycle() {
        let mut phase = Phase::P0;
        let expected = [Phase::P3, Phase::P2, Phase::P1, Phase::P0];
        for want in expected {
            phase = phase.clockwise();
            assert_eq!(phase, want);
        }
    }

    #[test]
    fn test_counter_clockwise_cycle() {
        let mut phase = Phase::P0;
        let expected = [Phase::P1, Phase::P2, Phase::P3, Phase::P0];
        for want in expected {
            phase = phase.counter_clockwise();
            assert_eq!(phase, want);
        }
    }

    #[test]
    fn test_excitation_table() {
        // One line of each coil pair is high in every phase, and
        // adjacent phases differ in exactly one coil pair.
        assert_eq!(
            Phase::P0.pattern(),
            CoilPattern { a1: true, a2: false, b1: false, b2: true }
        );
        assert_eq!(
            Phase::P1.pattern(),
            CoilPattern { a1: true, a2: false, b1: true, b2: false }
        );
        assert_eq!(
            Phase::P2.pattern(),
            CoilPattern { a1: false, a2: true, b1: true, b2: false }
        );
        assert_eq!(
            Phase::P3.pattern(),
            CoilPattern { a1: false, a2: true, b1: false, b2: true }
        );
    }

    #[test]
    fn test_coils_never_shorted() {
        for index in 0..PHASES_PER_CYCLE {
            let p = Phase::from_index(index).pattern();
            assert!(p.a1 != p.a2, "coil A driven from both ends in phase {index}");
            assert!(p.b1 != p.b2, "coil B driven from both ends in phase {index}");
        }
    }

    #[test]
    fn test_index_round_trip() {
        for index in 0..PHASES_PER_CYCLE {
            assert_eq!(Phase::from_index(index).index(), index);
        }
    }

    #[test]
    fn test_from_index_normalizes_out_of_range() {
        assert_eq!(Phase::from_index(4), Phase::P0);
        assert_eq!(Phase::from_index(17), Phase::P0);
        assert_eq!(Phase::from_index(u8::MAX), Phase::P0);
    }

    fn any_phase() -> impl Strategy<Value = Phase> {
        (0u8..PHASES_PER_CYCLE).prop_map(Phase::from_index)
    }

    fn any_direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Clockwise),
            Just(Direction::CounterClockwise),
        ]
    }

    proptest! {
        #[test]
        fn full_cycle_returns_to_start(start in any_phase(), dir in any_direction()) {
            let mut phase = start;
            for _ in 0..PHASES_PER_CYCLE {
                phase = phase.stepped(dir);
            }
            prop_assert_eq!(phase, start);
        }

        #[test]
        fn opposite_step_is_identity(start in any_phase(), dir in any_direction()) {
            prop_assert_eq!(start.stepped(dir).stepped(dir.opposite()), start);
        }

        #[test]
        fn step_always_moves(start in any_phase(), dir in any_direction()) {
            prop_assert_ne!(start.stepped(dir), start);
        }
    }
}
