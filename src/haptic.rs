// Glytch Band — Haptic Feedback Controller
//
// Non-blocking vibration patterns on the single motor line. `update()` runs
// once per loop tick and sets the motor for whatever phase the active
// pattern is in, so pattern timing rides on wall-clock deltas rather than
// loop iteration counts — loop jitter cannot stretch a pulse.
//
// A new trigger always preempts the active pattern and restarts the
// timeline; nothing is queued. The motor belongs to the most recent event.

use crate::config::HapticConfig;
use crate::drivers::Actuator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticPattern {
    Idle,
    Yes,
    No,
    Fall,
}

/// One entry of a pattern's phase table: motor level up to (excluding)
/// `until_ms` after the pattern start.
#[derive(Clone, Copy)]
struct Phase {
    on: bool,
    until_ms: u32,
}

const OFF: Phase = Phase {
    on: false,
    until_ms: 0,
};

pub struct HapticController {
    config: HapticConfig,
    pattern: HapticPattern,
    start_ms: u32,
    phase: usize,
}

impl HapticController {
    pub fn new(config: HapticConfig) -> Self {
        Self {
            config,
            pattern: HapticPattern::Idle,
            start_ms: 0,
            phase: 0,
        }
    }

    /// Single short buzz — YES feedback.
    pub fn trigger_yes(&mut self, now_ms: u32) {
        self.arm(HapticPattern::Yes, now_ms);
    }

    /// Double buzz (on-off-on) — NO feedback.
    pub fn trigger_no(&mut self, now_ms: u32) {
        self.arm(HapticPattern::No, now_ms);
    }

    /// Single long buzz — fall alert.
    pub fn trigger_fall(&mut self, now_ms: u32) {
        self.arm(HapticPattern::Fall, now_ms);
    }

    fn arm(&mut self, pattern: HapticPattern, now_ms: u32) {
        self.pattern = pattern;
        self.start_ms = now_ms;
        self.phase = 0;
    }

    /// Phase-boundary table for the active pattern, as (table, length).
    fn phase_table(&self) -> ([Phase; 3], usize) {
        let c = &self.config;
        match self.pattern {
            HapticPattern::Idle => ([OFF; 3], 0),
            HapticPattern::Yes => (
                [
                    Phase {
                        on: true,
                        until_ms: c.yes_pulse_ms,
                    },
                    OFF,
                    OFF,
                ],
                1,
            ),
            HapticPattern::No => (
                [
                    Phase {
                        on: true,
                        until_ms: c.no_phase_ms,
                    },
                    Phase {
                        on: false,
                        until_ms: 2 * c.no_phase_ms,
                    },
                    Phase {
                        on: true,
                        until_ms: 3 * c.no_phase_ms,
                    },
                ],
                3,
            ),
            HapticPattern::Fall => (
                [
                    Phase {
                        on: true,
                        until_ms: c.fall_pulse_ms,
                    },
                    OFF,
                    OFF,
                ],
                1,
            ),
        }
    }

    /// Advance the active pattern to `now_ms` and drive the motor. Must be
    /// called every tick; never blocks.
    pub fn update<A: Actuator>(&mut self, now_ms: u32, actuator: &mut A) {
        let (table, len) = self.phase_table();
        if len == 0 {
            return; // Idle — leave the line alone
        }

        let elapsed = now_ms.wrapping_sub(self.start_ms);
        for (index, phase) in table[..len].iter().enumerate() {
            if elapsed < phase.until_ms {
                self.phase = index;
                actuator.set_active(phase.on);
                return;
            }
        }

        // Past the final boundary: motor off, back to idle.
        actuator.set_active(false);
        self.pattern = HapticPattern::Idle;
        self.phase = 0;
    }

    pub fn pattern(&self) -> HapticPattern {
        self.pattern
    }

    pub fn phase(&self) -> usize {
        self.phase
    }
}
