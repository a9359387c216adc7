// Glytch Band — Wrist-Twist Gesture Detector
//
// Classifies the baseline-corrected angular rate on one configured axis into
// YES (positive twist) and NO (negative twist) gestures. Three guards keep a
// single motion from firing more than once:
//   - deadzone: rates under ~40 °/s are noise and force the Rest state
//   - hysteresis: a gesture only fires from Rest, so the wrist must pass
//     back through the deadzone before the next one
//   - cooldown: a hard floor between emissions, independent of motion shape

use crate::config::{GestureConfig, TwistAxis};
use crate::events::{BaselineOffset, Gesture, MotionSample};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Rest,
    MovingPositive,
    MovingNegative,
}

pub struct GestureDetector {
    config: GestureConfig,
    state: GestureState,
    last_gesture_ms: Option<u32>,
    last_twist_dps: f32,
}

impl GestureDetector {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: GestureState::Rest,
            last_gesture_ms: None,
            last_twist_dps: 0.0,
        }
    }

    /// Baseline-corrected twist rate in °/s for the configured axis.
    fn twist_dps(&self, sample: &MotionSample, baseline: &BaselineOffset) -> f32 {
        // Widen before subtracting: raw minus baseline can exceed i16.
        let raw = match self.config.twist_axis {
            TwistAxis::X => sample.gx as i32 - baseline.gx as i32,
            TwistAxis::Y => sample.gy as i32 - baseline.gy as i32,
            TwistAxis::Z => sample.gz as i32 - baseline.gz as i32,
        };
        (raw as f32 / self.config.gyro_sensitivity) * self.config.invert_sign
    }

    /// Evaluate one sample. Returns the emitted gesture, if any.
    pub fn evaluate(
        &mut self,
        sample: &MotionSample,
        baseline: &BaselineOffset,
    ) -> Option<Gesture> {
        let now = sample.timestamp_ms;
        let twist = self.twist_dps(sample, baseline);
        self.last_twist_dps = twist;

        // Cooldown gate: inside the window nothing is evaluated at all,
        // state transitions included.
        if let Some(last) = self.last_gesture_ms {
            if now.wrapping_sub(last) < self.config.cooldown_ms {
                return None;
            }
        }

        // Deadzone always wins — it also cancels an in-progress
        // MovingPositive/MovingNegative classification.
        if twist.abs() < self.config.deadzone_dps {
            self.state = GestureState::Rest;
            return None;
        }

        // Hysteresis: outside Rest the wrist has to return through the
        // deadzone before anything new can fire.
        if self.state != GestureState::Rest {
            return None;
        }

        if twist > self.config.twist_threshold_dps {
            self.state = GestureState::MovingPositive;
            self.last_gesture_ms = Some(now);
            Some(Gesture::Yes)
        } else if twist < -self.config.twist_threshold_dps {
            self.state = GestureState::MovingNegative;
            self.last_gesture_ms = Some(now);
            Some(Gesture::No)
        } else {
            None
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Twist rate from the most recent evaluation, for telemetry.
    pub fn last_twist_dps(&self) -> f32 {
        self.last_twist_dps
    }
}
