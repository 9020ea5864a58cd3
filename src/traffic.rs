//! Traffic light phase derivation.
//!
//! The backend hands out a red/yellow/green cycle in whole seconds. The
//! active phase is the wall clock modulo the cycle length, with every
//! quantity kept in milliseconds.

use serde::{Deserialize, Serialize};

use crate::errors::AqiError;

/// Phase durations in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrafficTiming {
    pub red: u64,
    pub yellow: u64,
    pub green: u64,
}

impl TrafficTiming {
    /// Reject cycles with a zero-length phase or too long to count in ms.
    pub fn validate(&self) -> Result<(), AqiError> {
        if self.red == 0 || self.yellow == 0 || self.green == 0 {
            return Err(AqiError::InvalidResponse(format!(
                "traffic timings must be positive, got red={} yellow={} green={}",
                self.red, self.yellow, self.green
            )));
        }
        if self.checked_cycle_ms().is_none() {
            return Err(AqiError::InvalidResponse(format!(
                "traffic cycle too long: red={} yellow={} green={}",
                self.red, self.yellow, self.green
            )));
        }
        Ok(())
    }

    fn checked_cycle_ms(&self) -> Option<u64> {
        self.red
            .checked_add(self.yellow)?
            .checked_add(self.green)?
            .checked_mul(1000)
    }

    /// Full cycle length in milliseconds, saturating for unvalidated timings.
    #[must_use]
    pub fn cycle_ms(&self) -> u64 {
        self.checked_cycle_ms().unwrap_or(u64::MAX)
    }

    /// Position inside the cycle at wall-clock time `now_ms`.
    #[must_use]
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        match self.cycle_ms() {
            0 => 0,
            cycle => now_ms % cycle,
        }
    }

    /// Derive the phase active at wall-clock time `now_ms`.
    #[must_use]
    pub fn phase_at(&self, now_ms: u64) -> PhaseState {
        self.phase_for_elapsed(self.elapsed_ms(now_ms))
    }

    /// Derive the phase for a position already reduced into the cycle.
    #[must_use]
    pub fn phase_for_elapsed(&self, elapsed_ms: u64) -> PhaseState {
        // Exact once validated; red_end + yellow never exceeds the cycle
        let red_end = self.red.saturating_mul(1000);
        let yellow_end = red_end.saturating_add(self.yellow.saturating_mul(1000));
        let cycle = self.cycle_ms();

        let (phase, phase_end) = if elapsed_ms < red_end {
            (Phase::Red, red_end)
        } else if elapsed_ms < yellow_end {
            (Phase::Yellow, yellow_end)
        } else {
            (Phase::Green, cycle)
        };

        PhaseState {
            phase,
            elapsed_ms,
            remaining_ms: phase_end.saturating_sub(elapsed_ms),
        }
    }
}

/// Traffic light colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Red,
    Yellow,
    Green,
}

impl Phase {
    pub const ALL: [Self; 3] = [Self::Red, Self::Yellow, Self::Green];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
        }
    }
}

/// Result of a phase derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseState {
    pub phase: Phase,
    pub elapsed_ms: u64,
    /// Time left before the next phase starts
    pub remaining_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMING: TrafficTiming = TrafficTiming {
        red: 30,
        yellow: 5,
        green: 25,
    };

    #[test]
    fn test_phase_boundaries() {
        assert_eq!(TIMING.phase_for_elapsed(0).phase, Phase::Red);
        assert_eq!(TIMING.phase_for_elapsed(29_999).phase, Phase::Red);
        assert_eq!(TIMING.phase_for_elapsed(30_000).phase, Phase::Yellow);
        assert_eq!(TIMING.phase_for_elapsed(34_999).phase, Phase::Yellow);
        assert_eq!(TIMING.phase_for_elapsed(35_000).phase, Phase::Green);
        assert_eq!(TIMING.phase_for_elapsed(59_999).phase, Phase::Green);
    }

    #[test]
    fn test_wall_clock_wraps_whole_cycle() {
        // 60s cycle; 10 full cycles plus 32s lands in yellow
        let now = 10 * 60_000 + 32_000;
        let state = TIMING.phase_at(now);
        assert_eq!(state.phase, Phase::Yellow);
        assert_eq!(state.elapsed_ms, 32_000);
        assert_eq!(state.remaining_ms, 3_000);
    }

    #[test]
    fn test_every_elapsed_value_has_one_phase() {
        let timing = TrafficTiming {
            red: 2,
            yellow: 1,
            green: 3,
        };
        let mut counts = [0u64; 3];
        for elapsed in 0..timing.cycle_ms() {
            let phase = timing.phase_for_elapsed(elapsed).phase;
            let idx = Phase::ALL.iter().position(|p| *p == phase).unwrap();
            counts[idx] += 1;
        }
        assert_eq!(counts, [2_000, 1_000, 3_000]);
    }

    #[test]
    fn test_real_clock_cycles_through_phases() {
        // Sampling one second apart across a cycle must visit every phase
        let start = 1_700_000_000_123u64;
        let mut seen = std::collections::HashSet::new();
        for s in 0..60 {
            seen.insert(TIMING.phase_at(start + s * 1000).phase);
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_validate_rejects_zero() {
        let bad = TrafficTiming {
            red: 0,
            yellow: 5,
            green: 5,
        };
        assert!(bad.validate().is_err());
        assert!(TIMING.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_overflowing_cycle() {
        let sum_overflows = TrafficTiming {
            red: u64::MAX,
            yellow: 1,
            green: 1,
        };
        let ms_overflows = TrafficTiming {
            red: 1 << 60,
            yellow: 1,
            green: 1,
        };
        assert!(matches!(sum_overflows.validate(), Err(AqiError::InvalidResponse(_))));
        assert!(matches!(ms_overflows.validate(), Err(AqiError::InvalidResponse(_))));

        // Unvalidated timings still derive a phase without panicking
        assert_eq!(ms_overflows.phase_at(1_700_000_000_000).phase, Phase::Red);
        assert_eq!(sum_overflows.phase_at(u64::MAX - 1).phase, Phase::Red);
    }

    #[test]
    fn test_longest_valid_cycle() {
        let max_secs = u64::MAX / 1000;
        let timing = TrafficTiming {
            red: max_secs - 2,
            yellow: 1,
            green: 1,
        };
        assert!(timing.validate().is_ok());
        assert_eq!(timing.cycle_ms(), max_secs * 1000);
        assert_eq!(timing.phase_for_elapsed(max_secs * 1000 - 1).phase, Phase::Green);
    }
}
