// Glytch Band — Impact Fall Detector
//
// A fall must show up on both sensors in the same evaluation: piezo impulse
// over threshold AND acceleration magnitude over threshold. Either signal
// alone false-positives too easily — a tap on the case trips the piezo, a
// fast arm swing trips the accelerometer. Requiring both trades a chance of
// missing a soft fall for a much lower false-positive rate.
//
// The only state between triggers is the debounce timestamp.

use crate::config::FallConfig;
use crate::events::{FallEvent, ImpactSample, MotionSample};

pub struct FallDetector {
    config: FallConfig,
    last_fall_ms: Option<u32>,
}

impl FallDetector {
    pub fn new(config: FallConfig) -> Self {
        Self {
            config,
            last_fall_ms: None,
        }
    }

    /// Evaluate one tick's motion + impact pair. Returns the declared fall,
    /// if any.
    pub fn evaluate(
        &mut self,
        motion: &MotionSample,
        impact: &ImpactSample,
    ) -> Option<FallEvent> {
        let now = motion.timestamp_ms;

        if let Some(last) = self.last_fall_ms {
            if now.wrapping_sub(last) < self.config.debounce_ms {
                return None;
            }
        }

        let acc_mag_sq = motion.acc_mag_sq();
        if impact.magnitude > self.config.impact_threshold
            && acc_mag_sq > self.config.acc_mag_sq_threshold
        {
            self.last_fall_ms = Some(now);
            return Some(FallEvent {
                impact: impact.magnitude,
                acc_mag_sq,
                timestamp_ms: now,
            });
        }

        None
    }
}
